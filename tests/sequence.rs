use skyburst::audio::SilentTrack;
use skyburst::canvas::Canvas;
use skyburst::config::Config;
use skyburst::sequence::SequenceItem;
use skyburst::show::{Input, Show, FRAME_MS};

struct Launch {
    text: String,
    at_ms: f64,
    x: f32,
    hue: f32,
}

/// Tick for `duration_ms`, noting each captioned rocket as it appears and the
/// times at which the spawn chance changed.
fn watch(show: &mut Show<SilentTrack>, duration_ms: f64) -> (Vec<Launch>, Vec<(f64, f32)>) {
    let mut canvas = Canvas::new(125, 50, 8.0, (0, 0, 0));
    let mut launches: Vec<Launch> = Vec::new();
    let mut chances = Vec::new();
    let mut chance = show.chance().current();

    while show.timers().now_ms() < duration_ms {
        show.tick(&mut canvas, FRAME_MS);
        let now = show.timers().now_ms();

        for fw in &show.populations().fireworks {
            if let Some(text) = fw.text() {
                if !launches.iter().any(|l| l.text == text) {
                    launches.push(Launch { text: text.to_string(), at_ms: now, x: fw.position().x, hue: fw.hue() });
                }
            }
        }

        if show.chance().current() != chance {
            chance = show.chance().current();
            chances.push((now, chance));
        }
    }
    (launches, chances)
}

fn fired_within_a_frame(at_ms: f64, due_ms: f64) -> bool {
    at_ms >= due_ms - 1e-6 && at_ms < due_ms + FRAME_MS + 1e-6
}

#[test]
fn greeting_launches_at_absolute_offsets() {
    let config = Config { seed: Some(2026), ..Config::default() };
    let mut show = Show::new(&config, SilentTrack::new(true));
    show.start();
    show.launch_sequence();

    let (launches, chances) = watch(&mut show, 8000.0);

    let texts: Vec<&str> = launches.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Happy", "New", "Year", "2026"]);

    for (launch, due) in launches.iter().zip([1000.0, 2500.0, 4000.0, 5500.0]) {
        assert!(fired_within_a_frame(launch.at_ms, due), "{} at {}", launch.text, launch.at_ms);
    }

    // Captioned rockets climb straight up from their fraction of the width.
    assert!((launches[0].x - 200.0).abs() < 1e-3);
    assert!((launches[1].x - 500.0).abs() < 1e-3);
    assert!((launches[2].x - 800.0).abs() < 1e-3);
    assert_eq!(launches[3].hue, 180.0);

    assert_eq!(chances.len(), 1);
    let (at, chance) = chances[0];
    assert_eq!(chance, 0.10);
    assert!(fired_within_a_frame(at, 7000.0), "escalated at {}", at);
}

#[test]
fn delays_are_not_cumulative() {
    let sequence = vec![
        SequenceItem::new("Late", 3000, 0.5),
        SequenceItem::new("Early", 500, 0.5),
        SequenceItem::new("Middle", 1500, 0.5),
    ];
    let config = Config { base_chance: 0.0, escalated_chance: 0.0, seed: Some(4), sequence, ..Config::default() };
    let mut show = Show::new(&config, SilentTrack::new(true));
    show.start();
    show.launch_sequence();

    let (launches, _) = watch(&mut show, 3500.0);
    let texts: Vec<&str> = launches.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Early", "Middle", "Late"]);
    assert!(fired_within_a_frame(launches[0].at_ms, 500.0));
    assert!(fired_within_a_frame(launches[1].at_ms, 1500.0));
    assert!(fired_within_a_frame(launches[2].at_ms, 3000.0));
}

#[test]
fn opening_the_envelope_delays_the_sequence() {
    let config = Config { base_chance: 0.0, escalated_chance: 0.0, seed: Some(7), ..Config::default() };
    let mut show = Show::new(&config, SilentTrack::new(true));
    show.start();
    show.handle_input(Input::OpenEnvelope, 1000.0, 800.0);
    show.handle_input(Input::OpenEnvelope, 1000.0, 800.0);

    let (launches, _) = watch(&mut show, 7000.0);
    assert_eq!(launches.len(), 4);
    // Sequence starts on the first frame at or after 1000 ms.
    assert!(launches[0].at_ms >= 2000.0 - 1e-6 && launches[0].at_ms < 2000.0 + 2.0 * FRAME_MS);
}

#[test]
fn captioned_rockets_leave_floating_text() {
    let config = Config { base_chance: 0.0, escalated_chance: 0.0, seed: Some(9), ..Config::default() };
    let mut show = Show::new(&config, SilentTrack::new(true));
    show.start();
    show.launch_sequence();

    let mut canvas = Canvas::new(125, 50, 8.0, (0, 0, 0));
    let mut seen = Vec::new();
    while show.timers().now_ms() < 8000.0 {
        show.tick(&mut canvas, FRAME_MS);
        for text in &show.populations().texts {
            if !seen.iter().any(|s: &String| s == text.text()) {
                seen.push(text.text().to_string());
            }
        }
    }
    assert_eq!(seen, vec!["Happy", "New", "Year", "2026"]);
}
