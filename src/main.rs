//! # study-planner
//!
//! Turns a student's availability and their subjects into a day-by-day study plan.

#![deny(
    clippy::undocumented_unsafe_blocks,
    clippy::missing_safety_doc,
    reason = "multi-person projects should document dangers"
)]
#![warn(missing_docs)]
#![cfg_attr(
    not(any(test, debug_assertions)),
    deny(
        clippy::missing_panics_doc,
        clippy::panic,
        clippy::unimplemented,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unreachable,
        reason = "prefer errors over panicking"
    )
)]
#![cfg_attr(
    not(any(test, debug_assertions)),
    forbid(clippy::todo, reason = "production code should not use `todo`")
)]

use chrono::prelude::*;
use data::{Schedule, Student, Subject};
use ids::{IdSource, RandomIds, Sequential};
use lexopt::prelude::*;
use planner::Planner;
use policy::Policy;
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use store::FileStore;
use thiserror::Error;

pub mod algo;
pub mod data;
pub mod ids;
pub mod logging;
pub mod planner;
pub mod policy;
pub mod store;

#[derive(Debug, Error)]
enum ArgsError {
    #[error("argument error")]
    LexoptError(#[from] lexopt::Error),
    #[error("{0} should only be provided once")]
    DuplicateArg(&'static str),
    #[error("unknown command `{0}`, expected `generate`, `show` or `reset`")]
    UnknownCommand(String),
    #[error("could not print help")]
    Help(#[source] std::io::Error),
}

/// What to do with the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Command {
    /// Make a new plan from the input files and keep it.
    Generate,
    /// Print the kept plan.
    #[default]
    Show,
    /// Forget the kept plan.
    Reset,
}

impl FromStr for Command {
    type Err = ArgsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generate" | "gen" => Ok(Self::Generate),
            "show" => Ok(Self::Show),
            "reset" => Ok(Self::Reset),
            _ => Err(ArgsError::UnknownCommand(s.to_string())),
        }
    }
}

#[derive(Debug)]
struct CmdLineData {
    pub command: Command,
    pub student_path: PathBuf,
    pub subjects_path: PathBuf,
    pub store_dir: PathBuf,
    pub key: Option<String>,
    pub policy_path: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub sequential_ids: bool,
    pub json: bool,
    pub verbosity: u8,
}

fn set_once<T>(slot: &mut Option<T>, name: &'static str, value: T) -> Result<(), ArgsError> {
    if slot.is_some() {
        return Err(ArgsError::DuplicateArg(name));
    }
    *slot = Some(value);
    Ok(())
}

/// Parse command line arguments.
///
/// [`None`] if help was printed instead.
fn get_data(mut parser: lexopt::Parser) -> Result<Option<CmdLineData>, ArgsError> {
    macro_rules! default_path {
        (student) => {
            "./student.json"
        };
        (subjects) => {
            "./subjects.json"
        };
        (store) => {
            "./.study-plan"
        };
    }

    static USAGES: &[&[(bool, &str)]] = &[&[(false, "[OPTIONS]"), (false, "[COMMAND]")]];

    let mut command = None;
    let mut student_path = None;
    let mut subjects_path = None;
    let mut store_dir = None;
    let mut key = None;
    let mut policy_path = None;
    let mut today = None;
    let mut sequential_ids = false;
    let mut json = false;
    let mut verbosity = 0u8;

    while let Some(arg) = parser.next()? {
        cmdline::parse_arg! {
            options = OPTIONS;
            parser = parser;
            match arg {
                #[help = "One of `generate`, `show` (default) or `reset`"]
                ( COMMAND ) => set_once(&mut command, "COMMAND", COMMAND.string()?.parse::<Command>()?)?,

                #[help = concat!("Student profile to plan for, otherwise default to ", default_path!(student))]
                ( -'s', --"student" <PATH> ) => set_once(&mut student_path, "--student", PathBuf::from(PATH?))?,

                #[help = concat!("Subject list to plan for, otherwise default to ", default_path!(subjects))]
                ( -'S', --"subjects" <PATH> ) => set_once(&mut subjects_path, "--subjects", PathBuf::from(PATH?))?,

                #[help = concat!("Directory plans are kept in, otherwise default to ", default_path!(store))]
                ( -'d', --"store" <DIR> ) => set_once(&mut store_dir, "--store", PathBuf::from(DIR?))?,

                #[help = "Name the plan is kept under, otherwise default to `study-plan`"]
                ( -'k', --"key" <KEY> ) => set_once(&mut key, "--key", KEY?.string()?)?,

                #[help = "TOML file overriding planning constants"]
                ( -'p', --"policy" <PATH> ) => set_once(&mut policy_path, "--policy", PathBuf::from(PATH?))?,

                #[help = "Plan as if today were DATE (YYYY-MM-DD)"]
                ( -'t', --"today" <DATE> ) => set_once(&mut today, "--today", DATE?.parse::<NaiveDate>()?)?,

                #[help = "Number sessions 1, 2, 3... instead of using random identifiers"]
                ( -'n', --"sequential-ids" ) => sequential_ids = true,

                #[help = "Print the plan as JSON"]
                ( -'j', --"json" ) => json = true,

                #[help = "Log more; repeat for even more"]
                ( -'v', --"verbose" ) => verbosity = verbosity.saturating_add(1),

                #[help = "Display this message"]
                ( -'h', --"help" ) => {
                    cmdline::print_help(env!("CARGO_PKG_NAME"), USAGES, OPTIONS)
                        .map_err(ArgsError::Help)?;
                    return Ok(None);
                },

                _ => Err(arg.unexpected())?,
            }
        }
    }

    Ok(Some(CmdLineData {
        command: command.unwrap_or_default(),
        student_path: student_path.unwrap_or_else(|| PathBuf::from(default_path!(student))),
        subjects_path: subjects_path.unwrap_or_else(|| PathBuf::from(default_path!(subjects))),
        store_dir: store_dir.unwrap_or_else(|| PathBuf::from(default_path!(store))),
        key,
        policy_path,
        today,
        sequential_ids,
        json,
        verbosity,
    }))
}

#[derive(Debug, Error)]
enum InputError {
    #[error("could not open {what} data `{}`", path.display())]
    Open {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read {what} data `{}`", path.display())]
    Parse {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn load_from_path<T>(path: &Path, what: &'static str) -> Result<T, InputError>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|source| InputError::Open {
        what,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| InputError::Parse {
        what,
        path: path.to_path_buf(),
        source,
    })
}

fn print_schedule(schedule: &Schedule, json: bool) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, schedule)?;
        writeln!(out)
    } else {
        let minutes = schedule.total_minutes();
        write!(out, "{schedule}")?;
        writeln!(
            out,
            "{} sessions over {} days, {}h {:02}m in total",
            schedule.blocks().count(),
            schedule.len(),
            minutes / 60,
            minutes % 60,
        )
    }
}

/// Wrapper so that main can provide standardized error printing
fn inner_main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(CmdLineData {
        command,
        student_path,
        subjects_path,
        store_dir,
        key,
        policy_path,
        today,
        sequential_ids,
        json,
        verbosity,
    }) = get_data(lexopt::Parser::from_env())?
    else {
        return Ok(());
    };

    logging::init(verbosity)?;

    let policy = match policy_path {
        Some(path) => Policy::load(path)?,
        None => Policy::default(),
    };

    let mut planner = Planner::new(FileStore::new(store_dir), policy)?;
    if let Some(key) = key {
        planner = planner.with_key(key);
    }

    match command {
        Command::Generate => {
            let student = load_from_path::<Student>(&student_path, "student")?;
            let subjects = load_from_path::<Vec<Subject>>(&subjects_path, "subject")?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let mut ids: Box<dyn IdSource> = if sequential_ids {
                Box::new(Sequential::starting_at(1))
            } else {
                Box::new(RandomIds)
            };

            let schedule = planner.plan(&student, &subjects, today, &mut ids)?;
            print_schedule(&schedule, json)?;
        }

        Command::Show => match planner.current()? {
            Some(schedule) => print_schedule(&schedule, json)?,
            None if json => println!("null"),
            None => println!(
                "No study plan yet. Run `{} generate` to make one.",
                env!("CARGO_PKG_NAME")
            ),
        },

        Command::Reset => {
            planner.reset()?;
            println!("Study plan cleared.");
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = inner_main() {
        let mut err: Option<&dyn std::error::Error> = Some(e.as_ref());
        let mut i = 0;
        while let Some(e) = err {
            eprintln!("{:indent$}{e}", "", indent = i);
            i += 2;
            err = e.source();
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<CmdLineData>, ArgsError> {
        get_data(lexopt::Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let data = parse(&[]).unwrap().unwrap();
        assert_eq!(data.command, Command::Show);
        assert_eq!(data.student_path, Path::new("./student.json"));
        assert_eq!(data.subjects_path, Path::new("./subjects.json"));
        assert_eq!(data.store_dir, Path::new("./.study-plan"));
        assert!(data.key.is_none() && data.policy_path.is_none() && data.today.is_none());
        assert!(!data.sequential_ids && !data.json);
        assert_eq!(data.verbosity, 0);
    }

    #[test]
    fn test_generate_with_options() {
        let data = parse(&[
            "generate",
            "-s",
            "me.json",
            "--subjects=courses.json",
            "-d",
            "plans",
            "--key",
            "spring",
            "-t",
            "2024-01-01",
            "-nj",
            "-vv",
        ])
        .unwrap()
        .unwrap();
        assert_eq!(data.command, Command::Generate);
        assert_eq!(data.student_path, Path::new("me.json"));
        assert_eq!(data.subjects_path, Path::new("courses.json"));
        assert_eq!(data.store_dir, Path::new("plans"));
        assert_eq!(data.key.as_deref(), Some("spring"));
        assert_eq!(data.today, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(data.sequential_ids && data.json);
        assert_eq!(data.verbosity, 2);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(matches!(parse(&["plan"]), Err(ArgsError::UnknownCommand(_))));
        assert!(matches!(parse(&["show", "reset"]), Err(ArgsError::DuplicateArg("COMMAND"))));
        assert!(matches!(
            parse(&["-k", "a", "-k", "b"]),
            Err(ArgsError::DuplicateArg("--key"))
        ));
        assert!(matches!(parse(&["--today", "tomorrow"]), Err(ArgsError::LexoptError(_))));
        assert!(matches!(parse(&["--frobnicate"]), Err(ArgsError::LexoptError(_))));
    }

    #[test]
    fn test_demo_inputs_plan() {
        let student = load_from_path::<Student>(Path::new("demos/student.json"), "student").unwrap();
        let subjects =
            load_from_path::<Vec<Subject>>(Path::new("demos/subjects.json"), "subject").unwrap();
        let policy = Policy::load("demos/policy.toml").unwrap();
        assert_eq!(policy.break_minutes, 15);

        let mut planner = Planner::new(store::MemoryStore::new(), policy).unwrap();
        let schedule = planner
            .plan(
                &student,
                &subjects,
                NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                &mut Sequential::default(),
            )
            .unwrap();
        assert_eq!(schedule.len(), 14);
        assert!(schedule.blocks().all(|b| b.duration_minutes >= 45));
    }

    #[test]
    fn test_load_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("student.json");
        std::fs::write(
            &path,
            r#"{
                "name": "Aman",
                "college": "GVSU",
                "year": "2026",
                "email": "aman@example.com",
                "weekdaysHours": 3,
                "weekendHours": 6,
                "preferredTime": "Night",
                "targetDate": "2024-03-01"
            }"#,
        )
        .unwrap();
        let student = load_from_path::<Student>(&path, "student").unwrap();
        assert_eq!(student.graduation_year, "2026");
        assert_eq!(student.weekend_hours, 6.0);

        assert!(matches!(
            load_from_path::<Student>(&dir.path().join("missing.json"), "student"),
            Err(InputError::Open { .. })
        ));
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            load_from_path::<Student>(&path, "student"),
            Err(InputError::Parse { .. })
        ));
    }
}
