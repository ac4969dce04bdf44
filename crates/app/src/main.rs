use std::fmt;
use std::io::{self, BufRead, Write};

use quiz_core::model::{ClockTime, GameKind, QuestionPayload};
use services::{
    FeedbackTone, NextOutcome, QuestionView, QuizController, ReportView, SessionEngine,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidGame { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidGame { raw } => write!(f, "invalid --game value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--game <name>] [--level <value>] [--seed <n>]");
    eprintln!();
    eprintln!("Games:");
    eprintln!("  complement   levels: 10, 20, 50, 100 (default 10)");
    eprintln!("  clock        levels: easy, medium, hard / facile, moyen, difficile");
    eprintln!("  money        levels: easy, medium, hard");
    eprintln!("  probability  levels: easy, medium, hard");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_GAME, QUIZ_LEVEL, QUIZ_SEED, RUST_LOG");
}

struct Args {
    game: GameKind,
    level: Option<String>,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut game = std::env::var("QUIZ_GAME")
            .ok()
            .and_then(|value| value.parse::<GameKind>().ok())
            .unwrap_or(GameKind::Complement);
        let mut level = std::env::var("QUIZ_LEVEL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut seed = std::env::var("QUIZ_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--game" => {
                    let value = require_value(args, "--game")?;
                    game = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidGame { raw: value.clone() })?;
                }
                "--level" => level = Some(require_value(args, "--level")?),
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self { game, level, seed }))
    }
}

/// Where the hands point on a 12-hour dial, as the numbers a child reads.
fn dial_positions(time: ClockTime) -> (u8, u8) {
    let hour = match time.hour() % 12 {
        0 => 12,
        h => h,
    };
    let minute = match time.minute() / 5 {
        0 => 12,
        m => m,
    };
    (hour, minute)
}

fn render_question(out: &mut impl Write, view: &QuestionView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Question {}/{}  [{}%]",
        view.index, view.total, view.progress_percent
    )?;
    match view.payload {
        QuestionPayload::Clock { time } => {
            let (hour, minute) = dial_positions(time);
            let past = time.minute() % 5;
            writeln!(out, "{}", view.prompt)?;
            writeln!(out, "  petite aiguille : près du {hour}")?;
            if past == 0 {
                writeln!(out, "  grande aiguille : sur le {minute}")?;
            } else {
                writeln!(out, "  grande aiguille : {past} traits après le {minute}")?;
            }
            if let Some(label) = view.period_label {
                writeln!(out, "  {label}")?;
            }
        }
        QuestionPayload::Probability { .. } => writeln!(out, "{} = ? %", view.prompt)?,
        QuestionPayload::Complement { .. } | QuestionPayload::Money { .. } => {
            writeln!(out, "{}", view.prompt)?;
        }
    }
    Ok(())
}

fn render_report(out: &mut impl Write, report: &ReportView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Score : {}/{}", report.score, report.total)?;
    writeln!(out, "Temps : {}", report.elapsed_label)?;
    for line in &report.lines {
        let mark = if line.is_correct { "✔" } else { "✘" };
        writeln!(out, "{mark} {}", line.text)?;
    }
    Ok(())
}

fn prompt_line(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn play(
    controller: &mut QuizController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut view = controller.on_start()?;
    loop {
        render_question(out, &view)?;

        loop {
            let Some(raw) = prompt_line(input, out, "> ")? else {
                return Ok(false);
            };
            // an empty field is ignored, like the disabled validate button
            if raw.trim().is_empty() {
                continue;
            }
            let feedback = controller.on_answer_submitted(&raw)?;
            writeln!(out, "{}", feedback.message)?;
            if feedback.tone != FeedbackTone::InvalidFormat {
                break;
            }
        }

        match controller.on_next()? {
            NextOutcome::Question(next) => view = next,
            NextOutcome::Finished(report) => {
                render_report(out, &report)?;
                return Ok(true);
            }
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(args) = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    let mut engine = SessionEngine::new(args.game);
    if let Some(seed) = args.seed {
        engine = engine.with_seed(seed);
    }
    let mut controller = QuizController::new(engine);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    loop {
        if let Some(level) = args.level.as_deref() {
            controller.on_configuration_changed(level)?;
        }
        tracing::info!(
            game = %args.game,
            config = %controller.engine().config(),
            "Starting quiz"
        );

        if !play(&mut controller, &mut input, &mut out)? {
            return Ok(());
        }

        let again = prompt_line(&mut input, &mut out, "\nRejouer ? (o/n) ")?;
        controller.on_restart();
        if !matches!(again.as_deref().map(str::trim), Some("o" | "O" | "oui")) {
            return Ok(());
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "services=info,quiz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dial_positions_use_twelve_for_top() {
        assert_eq!(dial_positions(ClockTime::new(0, 0).unwrap()), (12, 12));
        assert_eq!(dial_positions(ClockTime::new(15, 30).unwrap()), (3, 6));
        assert_eq!(dial_positions(ClockTime::new(8, 47).unwrap()), (8, 9));
    }

    #[test]
    fn args_parse_flags() {
        let mut argv = ["--game", "money", "--level", "hard", "--seed", "4"]
            .into_iter()
            .map(String::from);
        let args = Args::parse(&mut argv).unwrap().unwrap();
        assert_eq!(args.game, GameKind::Money);
        assert_eq!(args.level.as_deref(), Some("hard"));
        assert_eq!(args.seed, Some(4));
    }

    #[test]
    fn args_reject_unknown_flag() {
        let mut argv = ["--db", "x"].into_iter().map(String::from);
        assert!(matches!(
            Args::parse(&mut argv),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn scripted_session_prints_report() {
        let mut controller =
            QuizController::new(SessionEngine::new(GameKind::Complement).with_seed(1));
        let script = "\n7a\n0\n0\n0\n0\n0\n0\n0\n0\n0\n0\n";
        let mut input = io::Cursor::new(script.as_bytes());
        let mut out = Vec::new();

        let finished = play(&mut controller, &mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(finished);
        assert!(text.contains("Question 1/10"));
        assert!(text.contains("Format invalide"));
        assert!(text.contains("Score : "));
        assert_eq!(text.matches("10. ").count(), 1);
    }
}
