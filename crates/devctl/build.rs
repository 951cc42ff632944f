//! Renders man pages for devctl and every subcommand at build time.

use std::path::Path;

use clap::CommandFactory;

// The command tree is included directly rather than through the crate,
// so this script only needs clap and clap_complete from the
// build-dependencies table.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let man_dir = Path::new(&out_dir).join("man");
    std::fs::create_dir_all(&man_dir).expect("failed to create man output directory");

    render_tree(&cli::Cli::command(), &man_dir);
}

/// Write `<name>.1`, then recurse into visible subcommands under dashed
/// names (`devctl-devices.1` and so on).
fn render_tree(cmd: &clap::Command, man_dir: &Path) {
    let name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut page)
        .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));

    let target = man_dir.join(format!("{name}.1"));
    std::fs::write(&target, page)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", target.display()));

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        render_tree(&sub.clone().name(format!("{name}-{}", sub.get_name())), man_dir);
    }
}
