use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::debug;

mod cli;
mod cmd_menu;
mod cmd_show;
mod cmd_status;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — warn (stdout занят меню).
    // Пример: RUST_LOG=debug student-registry
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let cfg = cli.config();
    debug!("{}", cfg);

    match cli.cmd.unwrap_or(cli::Cmd::Menu) {
        cli::Cmd::Menu => cmd_menu::exec(cfg),

        cli::Cmd::Status { json } => cmd_status::exec(cfg, json),

        cli::Cmd::Student { id } => cmd_show::exec_student(cfg, id),

        cli::Cmd::Course { code } => cmd_show::exec_course(cfg, code),
    }
}
