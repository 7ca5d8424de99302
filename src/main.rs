mod app;
mod calendar;
mod config;
mod help;
mod jumpto;
mod mood;
mod stats;
mod store;
mod theme;
mod workout;
use crate::app::App;
use crate::calendar::YearMonth;
use crate::config::{Config, Options};
use crate::mood::MoodTag;
use crate::stats::Summary;
use crate::store::{JsonStore, WorkoutSource};
use crate::workout::{BodyPart, NewWorkout, YMD_FMT};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::ffi::OsString;
use time::{Date, OffsetDateTime};
use tracing::info;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        opts: Options,
        month: Option<YearMonth>,
    },
    Log {
        opts: Options,
        body_part: BodyPart,
        mood: i64,
        details: LogDetails,
    },
    Stats {
        opts: Options,
    },
    Help,
    Version,
}

/// Optional fields given to the `log` subcommand
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct LogDetails {
    intensity: Option<i64>,
    notes: Option<String>,
    struggles: Option<String>,
    date: Option<Date>,
}

impl LogDetails {
    fn is_empty(&self) -> bool {
        *self == LogDetails::default()
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        let mut details = LogDetails::default();
        let mut positional: Vec<OsString> = Vec::new();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('f') | Arg::Long("file") => opts.file = Some(parser.value()?.into()),
                Arg::Short('u') | Arg::Long("user") => opts.user = Some(parser.value()?.string()?),
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Short('i') | Arg::Long("intensity") => {
                    details.intensity = Some(parser.value()?.parse()?);
                }
                Arg::Short('n') | Arg::Long("notes") => details.notes = Some(parser.value()?.string()?),
                Arg::Short('s') | Arg::Long("struggles") => {
                    details.struggles = Some(parser.value()?.string()?);
                }
                Arg::Short('d') | Arg::Long("date") => {
                    let value = parser.value()?;
                    details.date = Some(value.parse_with(|s| Date::parse(s, YMD_FMT))?);
                }
                Arg::Value(value) => positional.push(value),
                _ => return Err(arg.unexpected()),
            }
        }
        let has_details = !details.is_empty();
        let mut positional = positional.into_iter();
        let command = match positional.next() {
            Some(first) if first == "log" => {
                let Some(body_part) = positional.next() else {
                    return Err(lexopt::Error::from("missing body part"));
                };
                let Some(mood) = positional.next() else {
                    return Err(lexopt::Error::from("missing mood rating"));
                };
                Command::Log {
                    opts,
                    body_part: body_part.parse()?,
                    mood: mood.parse()?,
                    details,
                }
            }
            Some(first) if first == "stats" => Command::Stats { opts },
            Some(month) => Command::Run {
                opts,
                month: Some(month.parse()?),
            },
            None => Command::Run { opts, month: None },
        };
        if let Some(extra) = positional.next() {
            return Err(lexopt::Error::UnexpectedArgument(extra));
        }
        if has_details && !matches!(command, Command::Log { .. }) {
            return Err(lexopt::Error::from(
                "--intensity, --notes, --struggles, and --date only apply to `log`",
            ));
        }
        Ok(command)
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { opts, month } => {
                let config = Config::from_env(opts);
                config.init_logging(true)?;
                let today = local_today()?;
                let store = open_store(&config)?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let mut app = App::new(store, config.user, today);
                    if let Some(month) = month {
                        app = app.start_month(month);
                    }
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Log {
                opts,
                body_part,
                mood,
                details,
            } => {
                let config = Config::from_env(opts);
                config.init_logging(false)?;
                let date = details.date.map_or_else(local_today, Ok)?;
                let mut workout = NewWorkout::new(date, body_part, mood)?;
                if let Some(intensity) = details.intensity {
                    workout = workout.intensity(intensity)?;
                }
                if let Some(notes) = details.notes {
                    workout = workout.notes(notes);
                }
                if let Some(struggles) = details.struggles {
                    workout = workout.struggles(struggles);
                }
                let mut store = open_store(&config)?;
                let rec = store
                    .insert(config.user.as_deref(), workout)
                    .context("failed to log workout")?;
                println!(
                    "{} Logged {} workout for {}",
                    MoodTag::from(rec.mood).emoji(),
                    rec.body_part.label(),
                    rec.date
                );
                Ok(())
            }
            Command::Stats { opts } => {
                let config = Config::from_env(opts);
                config.init_logging(false)?;
                let today = local_today()?;
                let store = open_store(&config)?;
                let workouts = store
                    .all(config.user.as_deref())
                    .context("failed to read workouts")?;
                print_summary(&Summary::compute(&workouts, today));
                Ok(())
            }
            Command::Help => {
                println!("Usage: gymcal [OPTIONS] [YYYY-MM]");
                println!("       gymcal [OPTIONS] log <BODY_PART> <MOOD 1-5> [LOG OPTIONS]");
                println!("       gymcal [OPTIONS] stats");
                println!();
                println!("Terminal workout log with a monthly mood calendar");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>       Workout log to use [env: GYMCAL_FILE] [default: workouts.json]");
                println!("  -u, --user <ID>         Only use workouts logged by this user [env: GYMCAL_USER]");
                println!("      --log-file <PATH>   Write diagnostic logs to this file");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                println!();
                println!("Log options:");
                println!("  -i, --intensity <1-5>   How hard the workout was");
                println!("  -n, --notes <TEXT>      Notes on the workout");
                println!("  -s, --struggles <TEXT>  What was difficult");
                println!("  -d, --date <YYYY-MM-DD> Day of the workout [default: today]");
                println!();
                let parts = BodyPart::ALL.map(BodyPart::as_str);
                println!("Body parts: {}", parts.join(", "));
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn local_today() -> anyhow::Result<Date> {
    Ok(OffsetDateTime::now_local()
        .context("failed to determine local date")?
        .date())
}

fn open_store(config: &Config) -> anyhow::Result<JsonStore> {
    let store = JsonStore::open(&config.data_file)?;
    if store.skipped() > 0 {
        info!(
            path = %store.path().display(),
            skipped = store.skipped(),
            "some workouts could not be read"
        );
    }
    Ok(store)
}

fn print_summary(summary: &Summary) {
    println!("{}", summary.headline());
    println!();
    println!("Current streak:  {} days", summary.current_streak);
    println!("Longest streak:  {} days", summary.longest_streak);
    println!("Total workouts:  {}", summary.total_workouts);
    match summary.last_workout {
        Some(d) => println!("Last workout:    {d}"),
        None => println!("Last workout:    never"),
    }
    if !summary.recent.is_empty() {
        println!();
        println!("Recent activity:");
        for w in &summary.recent {
            let tag = MoodTag::from(w.mood);
            print!(
                "  {} {:<10} {} {:<10}",
                tag.emoji(),
                w.body_part.label(),
                w.date,
                tag.label()
            );
            match w.intensity {
                Some(i) => println!("  intensity {i}/5"),
                None => println!(),
            }
        }
    }
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                opts: Options::default(),
                month: None
            }
        );
    }

    #[test]
    fn test_month() {
        assert_eq!(
            parse(&["-f", "gym.json", "2024-02"]).unwrap(),
            Command::Run {
                opts: Options {
                    file: Some(PathBuf::from("gym.json")),
                    ..Options::default()
                },
                month: Some(YearMonth::new(2024, 2).unwrap()),
            }
        );
        assert!(parse(&["2024-13"]).is_err());
        assert!(parse(&["99999-01"]).is_err());
    }

    #[test]
    fn test_log() {
        assert_eq!(
            parse(&[
                "log",
                "full_body",
                "4",
                "--intensity",
                "3",
                "--notes",
                "Felt strong",
                "--date",
                "2024-02-15",
                "--user",
                "alex",
            ])
            .unwrap(),
            Command::Log {
                opts: Options {
                    user: Some(String::from("alex")),
                    ..Options::default()
                },
                body_part: BodyPart::FullBody,
                mood: 4,
                details: LogDetails {
                    intensity: Some(3),
                    notes: Some(String::from("Felt strong")),
                    struggles: None,
                    date: Some(date!(2024 - 02 - 15)),
                },
            }
        );
    }

    #[test]
    fn test_log_errors() {
        assert!(parse(&["log"]).is_err());
        assert!(parse(&["log", "legs"]).is_err());
        assert!(parse(&["log", "neck", "3"]).is_err());
        assert!(parse(&["log", "legs", "great"]).is_err());
        assert!(parse(&["log", "legs", "3", "extra"]).is_err());
        assert!(parse(&["log", "legs", "3", "--date", "2024-02-30"]).is_err());
    }

    #[test]
    fn test_log_options_before_subcommand() {
        assert_eq!(
            parse(&["--date", "2024-02-15", "-i", "2", "log", "legs", "3"]).unwrap(),
            Command::Log {
                opts: Options::default(),
                body_part: BodyPart::Legs,
                mood: 3,
                details: LogDetails {
                    intensity: Some(2),
                    date: Some(date!(2024 - 02 - 15)),
                    ..LogDetails::default()
                },
            }
        );
    }

    #[test]
    fn test_log_options_outside_log() {
        assert!(parse(&["--intensity", "3"]).is_err());
        assert!(parse(&["stats", "--notes", "hi"]).is_err());
    }

    #[test]
    fn test_stats() {
        assert_eq!(
            parse(&["stats", "--log-file", "gym.log"]).unwrap(),
            Command::Stats {
                opts: Options {
                    log_file: Some(PathBuf::from("gym.log")),
                    ..Options::default()
                }
            }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["log", "--version"]).unwrap(), Command::Version);
        assert!(parse(&["--bogus"]).is_err());
    }
}
