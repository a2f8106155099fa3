use std::collections::HashSet;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

use ezhuthu::config::Config;
use ezhuthu::course::{AppProgress, Course, PracticeMode, apply_result_to_progress, next_lesson_id};
use ezhuthu::engine::{AdvanceThresholds, TypedBuffer, build_grapheme_infos, total_strokes};
use ezhuthu::event::{AppEvent, EventHandler, key_input_from_event};
use ezhuthu::generator::{
    GenerateError, TextRequest, build_pre_lesson_drill, bundled_common_words, bundled_letters,
    generate_test_text,
};
use ezhuthu::keyboard::{KeyMatcher, KeyMatching, KeystrokeMap};
use ezhuthu::session::{
    Attempt, AttemptResult, AttemptRules, KeyOutcome, Stage, compute_results, process_key,
};

#[derive(Parser)]
#[command(name = "ezhuthu", version, about = "Malayalam InScript typing tutor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show each grapheme of TEXT with the keystrokes that type it
    Graphemes {
        text: String,
        #[arg(long, help = "Print the model as JSON")]
        json: bool,
    },
    /// Score a typed string (one char per keystroke) against a target text
    Score {
        #[arg(long)]
        target: String,
        #[arg(long)]
        typed: String,
        #[arg(long)]
        duration_ms: u64,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Type one practice text in the terminal
    Practice {
        #[arg(long, value_parser = parse_mode, help = "letters, paragraph, common or course")]
        mode: Option<PracticeMode>,
        #[arg(long, help = "Practice this text instead of a generated one")]
        text: Option<String>,
        #[arg(long, help = "Course lesson id")]
        lesson: Option<String>,
        #[arg(long, value_parser = parse_matching, help = "physical, layout or emulated")]
        matching: Option<KeyMatching>,
        #[arg(long, help = "Seed for text generation")]
        seed: Option<u64>,
    },
}

fn parse_mode(s: &str) -> Result<PracticeMode, String> {
    PracticeMode::from_key(s).ok_or_else(|| format!("unknown mode {s:?}"))
}

fn parse_matching(s: &str) -> Result<KeyMatching, String> {
    match s {
        "physical" => Ok(KeyMatching::Physical),
        "layout" => Ok(KeyMatching::Layout),
        "emulated" => Ok(KeyMatching::Emulated),
        _ => Err(format!("unknown key matching {s:?}")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let map = KeystrokeMap::inscript();

    match cli.command {
        Command::Graphemes { text, json } => print_graphemes(&text, &map, json),
        Command::Score {
            target,
            typed,
            duration_ms,
            json,
        } => print_score(&target, &typed, duration_ms, &map, json),
        Command::Practice {
            mode,
            text,
            lesson,
            matching,
            seed,
        } => {
            let mut config = Config::load()?;
            if let Some(mode) = mode {
                config.practice.mode = mode;
            }
            if let Some(text) = text {
                config.practice.mode = PracticeMode::Paragraph;
                config.practice.paragraph = text;
            }
            if let Some(lesson) = lesson {
                config.practice.mode = PracticeMode::Course;
                config.practice.lesson_id = Some(lesson);
            }
            if let Some(matching) = matching {
                config.input.key_matching = matching;
            }
            let rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            practice(&config, &map, rng)
        }
    }
}

fn print_graphemes(text: &str, map: &KeystrokeMap, json: bool) -> Result<()> {
    let graphemes = build_grapheme_infos(text, map);
    if json {
        println!("{}", serde_json::to_string_pretty(&graphemes)?);
        return Ok(());
    }
    for (i, info) in graphemes.iter().enumerate() {
        let strokes: Vec<String> = info
            .keystrokes
            .iter()
            .map(|k| if k.shift { format!("Shift+{}", k.key) } else { k.key.clone() })
            .collect();
        println!("{i:>3}  {:<6} {}", info.grapheme, strokes.join(" "));
    }
    println!("{} graphemes, {} keystrokes", graphemes.len(), total_strokes(&graphemes));
    Ok(())
}

fn print_score(
    target: &str,
    typed: &str,
    duration_ms: u64,
    map: &KeystrokeMap,
    json: bool,
) -> Result<()> {
    let graphemes = build_grapheme_infos(target, map);
    let buffer = TypedBuffer::from(typed);
    let rules = Config::load()?.attempt_rules();
    let result = compute_results(&graphemes, buffer.units(), duration_ms, &rules);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, &rules.advance);
    }
    Ok(())
}

fn print_result(result: &AttemptResult, thresholds: &AdvanceThresholds) {
    let m = &result.metrics;
    println!(
        "WPM {:.1}  raw {:.1}  accuracy {:.1}%",
        m.wpm, m.raw_wpm, m.accuracy
    );
    println!(
        "correct {}  incorrect {}  missed {}  extra {}",
        m.correct, m.incorrect, m.missed, m.extra
    );
    println!("score {}/100", result.score.score);
    if result.passed() {
        println!("passed");
    } else {
        println!("not passed: {}", result.advance.failures(thresholds).join(", "));
    }
}

fn practice(config: &Config, map: &KeystrokeMap, mut rng: SmallRng) -> Result<()> {
    let letters = if config.practice.selected_letters.is_empty() {
        bundled_letters()?
    } else {
        config.practice.selected_letters.clone()
    };
    let words = bundled_common_words()?;
    let course = Course::bundled()?;
    let progress = AppProgress::default();
    let mut pre_lesson_done = HashSet::new();
    let matcher = config.input.key_matching.matcher(map);

    let mut rules = config.attempt_rules();
    let lesson = match config.practice.mode {
        PracticeMode::Course => {
            let id = config.practice.lesson_id.as_deref();
            id.and_then(|id| course.lesson(id)).or(course.lessons.first())
        }
        _ => None,
    };
    if let Some(lesson) = lesson {
        rules.advance = lesson.pass_criteria.resolve(&config.advance);
    }

    let text = loop {
        let request = TextRequest {
            mode: config.practice.mode,
            selected_letters: &letters,
            letters_length: config.practice.letters_length(),
            paragraph: &config.practice.paragraph,
            common_words: &words,
            common_length: config.practice.common_length(),
            course: &course,
            lesson_id: lesson.map(|l| l.id.as_str()),
            progress: &progress,
            pre_lesson_done: &pre_lesson_done,
            unlock: config.unlock,
        };
        match generate_test_text(&request, &mut rng) {
            Ok(text) => break text,
            Err(GenerateError::PreLessonDrill { lesson_id }) => {
                let Some(lesson) = course.lesson(&lesson_id) else {
                    bail!("unknown lesson {lesson_id}");
                };
                let drill = build_pre_lesson_drill(&lesson.keys);
                let drill_rules = AttemptRules {
                    advance: AdvanceThresholds::permissive(),
                    ..rules
                };
                let mut attempt = Attempt::new(&drill, map, drill_rules);
                let title = format!("Pre-lesson drill: {}", lesson.title);
                if run_terminal(&mut attempt, matcher.as_ref(), &title)?.is_none() {
                    return Ok(());
                }
                pre_lesson_done.insert(lesson_id);
            }
            Err(err) => bail!(err),
        }
    };

    let title = match lesson {
        Some(lesson) => format!("{}: {}", config.practice.mode.display_name(), lesson.title),
        None => config.practice.mode.display_name().to_string(),
    };
    let mut attempt = Attempt::new(&text, map, rules);
    let Some(result) = run_terminal(&mut attempt, matcher.as_ref(), &title)? else {
        return Ok(());
    };

    print_result(&result, &rules.advance);
    let updated = apply_result_to_progress(
        &progress,
        config.practice.mode,
        &result.metrics,
        lesson.map(|l| l.id.as_str()),
        result.timestamp,
    );
    if let Some(lesson) = lesson {
        if let Some(lp) = updated.lesson(&lesson.id) {
            println!("best {:.1} WPM, {:.1}% accuracy", lp.best_wpm, lp.best_acc);
        }
        if result.passed() {
            if let Some(next) = next_lesson_id(&course, &lesson.id) {
                println!("next lesson: {next}");
            }
        }
    }
    Ok(())
}

/// Runs one attempt in raw mode. `None` when the user quit before finishing.
fn run_terminal(
    attempt: &mut Attempt,
    matcher: &dyn KeyMatcher,
    title: &str,
) -> Result<Option<AttemptResult>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let events = EventHandler::new(Duration::from_millis(250));
    let result = run_attempt(attempt, matcher, title, &events);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run_attempt(
    attempt: &mut Attempt,
    matcher: &dyn KeyMatcher,
    title: &str,
    events: &EventHandler,
) -> Result<Option<AttemptResult>> {
    let mut notice = String::new();
    loop {
        render(attempt, title, &notice).context("drawing practice screen")?;

        match events.next()? {
            AppEvent::Key(key) => {
                if is_quit(&key) {
                    return Ok(None);
                }
                if key.code == KeyCode::Esc {
                    attempt.reset();
                    notice.clear();
                    continue;
                }
                let Some(input) = key_input_from_event(&key) else {
                    continue;
                };
                if attempt.stage == Stage::Prestart && input.suggests_latin_layout() {
                    notice = "Latin letter typed: no Malayalam layout is active".to_string();
                }
                if process_key(attempt, matcher, &input, Instant::now()) == KeyOutcome::Rejected {
                    notice = "Backspace is disabled".to_string();
                }
            }
            AppEvent::Tick => {}
        }

        if attempt.stage == Stage::Finished {
            return Ok(attempt.result.clone());
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn render(attempt: &Attempt, title: &str, notice: &str) -> io::Result<()> {
    let mut out = io::stdout();
    let hint = attempt
        .next_key_hint()
        .map(|h| h.describe())
        .unwrap_or_default();
    let elapsed = attempt.elapsed_ms(Instant::now()) as f64 / 1000.0;
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print(title),
        MoveTo(0, 2),
        Print(&attempt.text),
        MoveTo(0, 3),
        Print(attempt.buffer.to_string()),
        MoveTo(0, 5),
        Print(format!("next: {hint}")),
        MoveTo(0, 6),
        Print(format!(
            "{:.0}%  {elapsed:.1}s",
            attempt.completion() * 100.0
        )),
        MoveTo(0, 8),
        Print(notice),
        MoveTo(0, 9),
        Print("Esc restart  Ctrl+C quit"),
    )?;
    out.flush()
}
