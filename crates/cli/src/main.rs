// Copyright 2026 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use alloy_primitives::{Bytes, hex};
use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use ecp_core::{ERROR_MESSAGE_CAPACITY, MsmConfig, Operation, SUCCESS, run};
use std::ffi::CStr;
use tracing::{debug_span, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Simple CLI to run Ethereum elliptic-curve precompile operations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of parallel chunks for multi-scalar multiplication (0 uses every available thread).
    #[arg(long, env = "ECP_TASKS", global = true, default_value_t = 0)]
    tasks: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Run one operation and print its hex-encoded output.
    Run(RunCommand),

    /// List the supported operations with their input and output lengths.
    List,
}

#[derive(Parser, Debug, PartialEq, Eq)]
struct RunCommand {
    /// Operation name (e.g., bls12-g1-add); see `list`.
    operation: Operation,

    /// Hex-encoded input, with or without the 0x prefix.
    #[arg(default_value = "")]
    input: Bytes,
}

fn main() -> anyhow::Result<()> {
    setup_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for op in Operation::ALL {
                let rule = op.input_rule().to_string();
                println!("{op:<24} input {rule:<24} output {}", op.output_len());
            }
        }
        Commands::Run(RunCommand { operation, input }) => {
            let config = MsmConfig::new(cli.tasks);
            let mut output = vec![0u8; operation.output_len()];
            let mut error = [0u8; ERROR_MESSAGE_CAPACITY];

            let status = {
                let _guard = debug_span!("execute").entered();
                run(operation, &input, &mut output, &mut error, &config)
            };
            let message = CStr::from_bytes_until_nul(&error).context("unterminated error message")?;
            ensure!(
                status == SUCCESS,
                "{operation} failed with status {status}: {}",
                message.to_string_lossy()
            );

            info!(
                %operation,
                len = input.len(),
                tasks = config.effective_tasks(),
                "Operation successful"
            );
            println!("{}", hex::encode_prefixed(&output));
        }
    }

    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
