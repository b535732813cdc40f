// ── dialog-demo ──────────────────────────────────────────────────────────────
//
// Runs one dialog described by a JSON request and prints the outcome as
// JSON.  The request comes from the file named on the command line, or stdin:
//
//   {"kind": "load", "title": "Open track",
//    "filters": [{"desc": "Music File", "extensions": ["mp3", "ogg"]}]}
//
// `RUST_LOG=debug` shows what the library sends to the native side.

#![deny(unsafe_code)]

use std::{io::Read, path::PathBuf};

use dialog::{Backend, DialogError, FileFilter, Owner};
use serde::{Deserialize, Serialize};

// ── Request / outcome ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Request {
    YesNo(MessageOptions),
    Info(MessageOptions),
    Error(MessageOptions),
    Load(FileOptions),
    Save(FileOptions),
    Browse(DirectoryOptions),
}

#[derive(Debug, Deserialize)]
struct MessageOptions {
    message: String,
    #[serde(default)]
    title: String,
    #[serde(default = "no_owner")]
    owner: Owner,
}

fn no_owner() -> Owner {
    Owner::None
}

#[derive(Debug, Default, Deserialize)]
struct FileOptions {
    #[serde(default)]
    title: String,
    #[serde(default)]
    start_file: String,
    start_dir: Option<PathBuf>,
    #[serde(default)]
    filters: Vec<FileFilter>,
    #[serde(default)]
    owner: Owner,
}

#[derive(Debug, Default, Deserialize)]
struct DirectoryOptions {
    #[serde(default)]
    title: String,
    start_dir: Option<PathBuf>,
    #[serde(default)]
    owner: Owner,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum Outcome {
    Answer { yes: bool },
    Shown,
    Path { path: PathBuf },
    Cancelled,
    Failed { error: String },
}

impl From<dialog::Result<PathBuf>> for Outcome {
    fn from(r: dialog::Result<PathBuf>) -> Self {
        match r {
            Ok(path) => Self::Path { path },
            Err(DialogError::Cancelled) => Self::Cancelled,
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg_attr(not(windows), allow(dead_code))]
fn file_builder(o: &FileOptions) -> dialog::FileBuilder {
    let mut b = dialog::file()
        .title(o.title.as_str())
        .set_start_file(o.start_file.as_str())
        .filters(o.filters.iter().cloned())
        .owner(o.owner);
    if let Some(dir) = &o.start_dir {
        b = b.set_start_dir(dir);
    }
    b
}

#[cfg_attr(not(windows), allow(dead_code))]
fn run<B: Backend + ?Sized>(req: &Request, backend: &B) -> Outcome {
    let msg = |o: &MessageOptions| {
        dialog::message(o.message.as_str())
            .title(o.title.as_str())
            .owner(o.owner)
    };

    match req {
        Request::YesNo(o) => Outcome::Answer {
            yes: msg(o).yes_no_with(backend),
        },
        Request::Info(o) => {
            msg(o).info_with(backend);
            Outcome::Shown
        }
        Request::Error(o) => {
            msg(o).error_with(backend);
            Outcome::Shown
        }
        Request::Load(o) => file_builder(o).load_with(backend).into(),
        Request::Save(o) => file_builder(o).save_with(backend).into(),
        Request::Browse(o) => {
            let mut b = dialog::directory().title(o.title.as_str()).owner(o.owner);
            if let Some(dir) = &o.start_dir {
                b = b.set_start_dir(dir);
            }
            b.browse_with(backend).into()
        }
    }
}

#[cfg(windows)]
fn run_native(req: &Request) -> Result<Outcome, Box<dyn std::error::Error>> {
    Ok(run(req, dialog::platform::win32::backend()))
}

#[cfg(not(windows))]
fn run_native(_req: &Request) -> Result<Outcome, Box<dyn std::error::Error>> {
    Err("no native dialog backend for this platform".into())
}

fn read_request() -> Result<Request, Box<dyn std::error::Error>> {
    let text = match std::env::args_os().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn main() {
    env_logger::init();

    let result = read_request().and_then(|req| {
        log::debug!("request: {req:?}");
        run_native(&req)
    });

    match result {
        Ok(outcome) => match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("dialog-demo: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            log::error!("{e}");
            #[cfg(windows)]
            dialog::message(e.to_string()).title("dialog-demo").error();
            eprintln!("dialog-demo: {e}");
            std::process::exit(1);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
