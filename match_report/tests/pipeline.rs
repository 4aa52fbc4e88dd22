use std::fmt::Write;

use leaderboard::Metric;
use match_report::{Analysis, Cache, Config, read_rows};
use tracking::Dataset;

/// One second of 10 Hz tracking:
/// - `A` runs at 6 m/s in the left third with the ball at its feet;
/// - `B` jogs at 2 m/s in the right third;
/// - `C` stands still the whole time;
/// - the ball is alone at t=2s and off the pitch at t=3s.
fn session_csv() -> String {
    let mut csv = String::from("player_id,time_s,x,y,speed_mps\n");

    for i in 0..10 {
        let time = f64::from(i) / 10.0;
        let step = f64::from(i);

        writeln!(csv, "A,{time},{},0,6.0", -40.0 + step * 0.6).unwrap();
        writeln!(csv, "B,{time},{},5,2.0", 30.0 + step * 0.2).unwrap();
        writeln!(csv, "C,{time},0,0,0.0").unwrap();
        writeln!(csv, "ball,{time},{},0,6.0", -39.5 + step * 0.6).unwrap();
    }

    csv.push_str("ball,2.0,0,0,6.0\n");
    csv.push_str("ball,3.0,60,0,6.0\n");
    csv.push_str("ball,not-a-time,0,0,6.0\n");

    csv
}

fn dataset() -> Dataset {
    let input = read_rows(session_csv().as_bytes(), false).expect("readable csv");
    assert_eq!(1, input.skipped);

    Dataset::from_rows(input.rows, "ball").expect("valid rows")
}

fn ids(rows: &[leaderboard::RankingRow]) -> Vec<&str> {
    rows.iter().map(|this| this.entity_id.as_str()).collect()
}

#[test]
fn full_report() {
    let dataset = dataset();
    let cache = Cache::new();
    let analysis = Analysis::new(&dataset, Config::default())
        .expect("valid config")
        .with_cache(&cache);

    let report = analysis.report().expect("report");

    let distance = report.ranking(Metric::TotalDistance);
    assert_eq!(vec!["A", "B"], ids(distance));
    assert_eq!("Dist=6.00 m", distance[0].formatted_label);
    assert_eq!("Dist=2.00 m", distance[1].formatted_label);

    assert_eq!(vec!["A"], ids(report.ranking(Metric::Zone5Distance)));

    let speed = report.ranking(Metric::TopSpeed);
    assert_eq!(vec!["A", "B"], ids(speed));
    assert_eq!("Speed=6.00 m/s", speed[0].formatted_label);

    let zones = report
        .zones
        .iter()
        .map(|(player, zones)| (player.as_str(), *zones))
        .collect::<Vec<_>>();
    assert_eq!("A", zones[0].0);
    assert_eq!([100.0, 0.0, 0.0], zones[0].1.as_array());
    assert_eq!([0.0, 0.0, 100.0], zones[1].1.as_array());
    assert_eq!("C", zones[2].0);
    assert!(!zones[2].1.is_defined());

    assert_eq!(11, report.possession.len());
    assert!(report.possession[..10].iter().all(|this| this.possessor.as_deref() == Some("A")));
    assert_eq!(None, report.possession[10].possessor);
    assert_eq!(2.0, report.possession[10].time);

    assert_eq!(1, report.possession_share.len());
    assert_eq!("A", report.possession_share[0].entity_id);
    assert_eq!("100.00%", report.possession_share[0].formatted_label);
}

#[test]
fn top_k_and_selection() {
    let dataset = dataset();
    let analysis = Analysis::new(&dataset, Config::default()).expect("valid config");

    assert_eq!(vec!["A"], ids(&analysis.ranking(Metric::TotalDistance, Some(1)).expect("ranking")));
    assert_eq!(
        vec!["A", "B"],
        ids(&analysis.ranking(Metric::TotalDistance, Some(16)).expect("ranking"))
    );

    let ball = analysis.zone_distribution("ball").expect("zones").expect("ball");
    assert_eq!(["91%", "9%", "0%"], ball.labels());

    let heatmap = analysis.heatmap("B").expect("grid").expect("known player");
    assert_eq!(10, heatmap.total());
}

#[test]
fn report_serializes_to_json() {
    let dataset = dataset();
    let analysis = Analysis::new(&dataset, Config::default()).expect("valid config");

    let json = serde_json::to_value(analysis.report().expect("report")).expect("serializable");

    assert_eq!("A", json["possession_share"][0]["entity_id"]);
    // undefined zone shares come out as null
    assert!(json["zones"][2][1]["left"].is_null());
}

#[test]
fn config_changes_the_outcome() {
    let dataset = dataset();
    let json = r#"{ "cleaning": { "min_speed": 3.0 } }"#;
    let config = Config::from_reader(json.as_bytes()).expect("valid json");

    let analysis = Analysis::new(&dataset, config).expect("valid config");

    assert_eq!(vec!["A"], ids(&analysis.ranking(Metric::TopSpeed, None).expect("ranking")));
}
