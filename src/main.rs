use clap::Parser;

mod commands;
mod output;

use commands::swap;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "idswap")]
#[command(version = VERSION)]
#[command(about = "Replace a workspace identifier across a file tree, choosing files from a checklist")]
struct Cli {
    #[command(flatten)]
    swap: swap::SwapArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.swap.json {
        let (json_result, exit_code) = output::map_cmd_result_to_json(swap::run_report(&cli.swap));
        if let Err(err) = output::print_json_result(json_result) {
            output::print_error_text(&err);
        }
        return std::process::ExitCode::from(exit_code_to_u8(exit_code));
    }

    let exit_code = match swap::run(&cli.swap) {
        Ok((_outcome, exit_code)) => exit_code,
        Err(err) => {
            output::print_error_text(&err);
            output::exit_code_for_error(err.code)
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
