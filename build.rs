//! Build script for generating the `penguin` man pages.
//!
//! Renders `penguin.1` for the top-level command and one `penguin-<name>.1`
//! page per subcommand into the build output directory.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

use cli::Cli;

fn render(man: &Man, path: &Path) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(path, buffer)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "cargo:rerun-if-changed=build.rs")?;
    writeln!(stdout, "cargo:rerun-if-changed=src/cli/mod.rs")?;

    let out_dir =
        PathBuf::from(env::var_os("OUT_DIR").ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR was not set")
        })?);

    let command = Cli::command();
    render(&Man::new(command.clone()), &out_dir.join("penguin.1"))?;
    for sub in command.get_subcommands() {
        let name = format!("penguin-{}", sub.get_name());
        let man = Man::new(sub.clone()).title(name.to_uppercase());
        render(&man, &out_dir.join(format!("{name}.1")))?;
    }

    Ok(())
}
