use crossterm::{
    cursor::{Hide, Show as ShowCursor},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use skyburst::audio::SilentTrack;
use skyburst::canvas::Canvas;
use skyburst::cli::{self, Args};
use skyburst::config::Config;
use skyburst::logging;
use skyburst::scene::{Scene, TerminalStage};
use skyburst::show::Show;
use skyburst::speech::LoggedSpeech;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::info;

fn build_stage(args: &Args, config: &Config) -> skyburst::Result<TerminalStage<SilentTrack>> {
    let (cols, rows) = terminal::size()?;
    let canvas = Canvas::new(cols as usize, rows as usize, config.scale, config.background()?);

    let mut show = Show::new(config, SilentTrack::new(!args.mute));
    if args.speak {
        show = show.with_speech(Box::new(LoggedSpeech));
    }
    show.start();
    if args.open {
        show.start_celebration();
    }
    Ok(TerminalStage::new(show, canvas))
}

fn run_scene<S: Scene>(scene: &mut S, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                    scene.handle_event(&event);
                }
                Event::Resize(cols, rows) => {
                    scene.resize(*cols, *rows);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {
                    scene.handle_event(&event);
                }
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            scene.update(FIXED_DT);
            accumulator -= FIXED_DT;
        }

        scene.render(stdout)?;
    }

    Ok(())
}

fn main() -> skyburst::Result<()> {
    let args = cli::parse_args();
    let config = args.to_config()?;
    logging::init(args.log_file.as_deref(), args.log_level)?;
    info!(seed = ?config.seed, scale = config.scale, "starting show");

    let mut stage = build_stage(&args, &config)?;

    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout());
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)?;

    let result = run_scene(&mut stage, &mut stdout);

    // Restore the terminal even when the loop failed.
    execute!(stdout, ShowCursor, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal::disable_raw_mode()?;
    stdout.flush()?;

    result?;
    info!("show finished");
    Ok(())
}
