use std::fmt;

use learnhub_core::model::{CourseId, LessonId, UserId};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    user: UserId,
    course: CourseId,
    prefix: String,
    lessons: u32,
    completed: bool,
}

/// Lesson prefixes of the built-in catalog. Course ids and lesson ids use
/// different slugs (`react-complete-guide` owns `react-lesson-1`), so
/// seeding an unknown prefix would write flags no course counts.
fn default_prefix(course: &CourseId) -> &str {
    match course.as_str() {
        "react-complete-guide" => "react",
        "nodejs-mastery" => "node",
        "python-data-science" => "pyds",
        "design-figma" => "figma",
        "git-github-mastery" => "git",
        other => other,
    }
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLessons { raw: String },
    InvalidDbUrl { raw: String },
    AnonymousUser,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLessons { raw } => write!(f, "invalid --lessons value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::AnonymousUser => write!(f, "--user cannot be empty"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("LEARNHUB_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut user = std::env::var("LEARNHUB_USER").unwrap_or_else(|_| "demo-user".into());
        let mut course = std::env::var("LEARNHUB_COURSE")
            .unwrap_or_else(|_| "react-complete-guide".into());
        let mut prefix = std::env::var("LEARNHUB_PREFIX").ok();
        let mut lessons = std::env::var("LEARNHUB_LESSONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(3);
        let mut completed = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--user" => {
                    user = require_value(&mut args, "--user")?;
                }
                "--course" => {
                    course = require_value(&mut args, "--course")?;
                }
                "--prefix" => {
                    prefix = Some(require_value(&mut args, "--prefix")?);
                }
                "--lessons" => {
                    let value = require_value(&mut args, "--lessons")?;
                    lessons = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidLessons { raw: value.clone() })?;
                }
                "--completed" => {
                    completed = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let user = UserId::new(user);
        if user.is_anonymous() {
            return Err(ArgsError::AnonymousUser);
        }

        let course = CourseId::new(course);
        let prefix = prefix.unwrap_or_else(|| default_prefix(&course).to_string());

        Ok(Self {
            db_url,
            user,
            course,
            prefix,
            lessons,
            completed,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>     SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --user <id>           Learner id to seed (default: demo-user)");
    eprintln!("  --course <id>         Course id to seed (default: react-complete-guide)");
    eprintln!("  --prefix <slug>       Lesson id prefix (default: the course's catalog prefix)");
    eprintln!("  --lessons <n>         Number of lessons to mark watched (default: 3)");
    eprintln!("  --completed           Also record the course as completed");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  LEARNHUB_DB_URL, LEARNHUB_USER, LEARNHUB_COURSE, LEARNHUB_PREFIX, LEARNHUB_LESSONS");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;

    let mut progress = storage.load_progress(&args.user, &args.course).await?;
    for i in 1..=args.lessons {
        progress.mark_watched(LessonId::numbered(&args.prefix, i as usize));
    }
    storage
        .save_progress(&args.user, &args.course, &progress)
        .await?;

    if args.completed {
        let mut completions = storage.load_completions(&args.user).await?;
        completions.add(args.course.clone());
        storage.save_completions(&args.user, &completions).await?;
    }

    println!(
        "Seeded {} watched lessons of {} for user {} into {}{}",
        args.lessons,
        args.course,
        args.user,
        args.db_url,
        if args.completed { " (completed)" } else { "" }
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
