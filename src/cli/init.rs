//! `kb init` - create the board data directory

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::JsonDirStorage;

pub struct InitOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct InitOutput {
    data_dir: String,
    created: bool,
}

pub fn run(opts: InitOptions) -> Result<()> {
    let storage = match opts.data_dir {
        Some(dir) => JsonDirStorage::new(dir),
        None => JsonDirStorage::for_root(&std::env::current_dir()?),
    };

    let created = !storage.is_initialized();
    storage.init()?;

    let data = InitOutput {
        data_dir: storage.dir().display().to_string(),
        created,
    };

    let mut human = HumanOutput::new(if created {
        "Initialized board"
    } else {
        "Board already initialized"
    });
    human.push_summary("data dir", &data.data_dir);
    if created {
        human.push_next_step("kb project new <title>");
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "init",
        &data,
        Some(&human),
    )
}
