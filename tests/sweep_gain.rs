use phonotope::core::clock::ManualClock;
use phonotope::core::point::Point3;
use phonotope::field::graph::{GraphBuilder, SpeakerGraph};
use phonotope::field::registry::{FieldParams, ReportEvent, SoundField};
use phonotope::field::spatializer::Spatializer;

fn room_graph() -> SpeakerGraph {
    let mut b = GraphBuilder::new();
    b.speaker(0, Point3::new(0.0, 0.0, 0.0), &[]);
    b.speaker(1, Point3::new(4.0, 0.0, 0.0), &[]);
    b.speaker(2, Point3::new(2.0, 3.0, 0.0), &[]);
    b.speaker(3, Point3::new(2.0, 0.0, 3.0), &[]);
    b.build().expect("build")
}

fn field_with_clock(graph: SpeakerGraph) -> (SoundField, ManualClock) {
    let clock = ManualClock::new();
    let params = FieldParams {
        max_distance: 10.0,
        distance_to_time_ratio: 100.0,
        seed: 1,
    };
    let field = SoundField::with_clock(graph, params, Box::new(clock.clone()));
    (field, clock)
}

fn gains_of(field: &SoundField, want: &str) -> Vec<(u32, f32)> {
    for event in field.report() {
        if let ReportEvent::Sound { id, gains } = event {
            if id == want {
                return gains;
            }
        }
    }
    panic!("no report entry for {want}");
}

#[test]
fn start_of_sweep_matches_spatializer_at_start_point() {
    let graph = room_graph();
    let expected = Spatializer::new(10.0).gain_map(Point3::new(0.0, 0.0, 0.0), &graph);

    let (mut field, _clock) = field_with_clock(graph);
    field
        .sweep_sound(
            "flyby",
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            1000,
        )
        .expect("register");

    field.advance();
    let gains = gains_of(&field, "flyby");
    assert_eq!(gains.len(), expected.len());
    for (index, gain) in gains {
        assert!(
            (gain - expected[&index]).abs() < 1e-6,
            "speaker {index}: {gain} vs {}",
            expected[&index]
        );
    }
}

#[test]
fn end_of_sweep_approaches_spatializer_at_end_point() {
    let graph = room_graph();
    let expected = Spatializer::new(10.0).gain_map(Point3::new(4.0, 0.0, 0.0), &graph);

    let (mut field, clock) = field_with_clock(graph);
    field
        .sweep_sound(
            "flyby",
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            1000,
        )
        .expect("register");

    clock.set(999);
    field.advance();
    for (index, gain) in gains_of(&field, "flyby") {
        assert!(
            (gain - expected[&index]).abs() < 1e-2,
            "speaker {index}: {gain} vs {}",
            expected[&index]
        );
    }
}

#[test]
fn every_speaker_gets_a_weight() {
    let graph = room_graph();
    let n = graph.len();
    let (mut field, _clock) = field_with_clock(graph);
    field
        .sweep_sound(
            "flyby",
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(3.0, 1.0, 1.0),
            500,
        )
        .expect("register");

    field.advance();
    assert_eq!(gains_of(&field, "flyby").len(), n);
}

#[test]
fn sweep_dies_on_completed_travel() {
    let (mut field, clock) = field_with_clock(room_graph());
    field
        .sweep_sound(
            "flyby",
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            1000,
        )
        .expect("register");

    field.advance();
    clock.set(1000);
    let notices = field.advance();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].id, "flyby");
    assert_eq!(notices[0].status, "killed");
    assert!(field.is_empty());
}

#[test]
fn zero_duration_sweep_dies_on_first_tick() {
    let (mut field, _clock) = field_with_clock(room_graph());
    field
        .sweep_sound(
            "blip",
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            0,
        )
        .expect("register");

    let notices = field.advance();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].id, "blip");
}
