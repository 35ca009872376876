// Line-oriented JSON front end for the `he` service.
//
// Each line read on the standard input is a request such as
// `{"op":"encrypt","data":"42"}`; the response is written as one line on the
// standard output. Set `RUST_LOG=debug` to trace the requests.

use clap::Parser;
use he::bfv::BfvParametersBuilder;
use he::ckks::CkksParametersBuilder;
use he::paillier::{PaillierParametersBuilder, DEFAULT_MODULUS_SIZE};
use he::service::HeServiceBuilder;
use std::error::Error;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
struct Cli {
    #[arg(
        long,
        help = "The size in bits of the Paillier modulus",
        default_value_t = DEFAULT_MODULUS_SIZE
    )]
    modulus_size: usize,

    #[arg(long, help = "The degree of the CKKS and BFV polynomials")]
    degree: Option<usize>,

    #[arg(long, help = "Do not generate Paillier keys until rotate-keys")]
    no_keys: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();

    let paillier = PaillierParametersBuilder::new()
        .set_modulus_size(args.modulus_size)
        .build_arc()?;
    let mut ckks = CkksParametersBuilder::new();
    let mut bfv = BfvParametersBuilder::new();
    if let Some(degree) = args.degree {
        ckks.set_degree(degree);
        bfv.set_degree(degree);
    }

    let service = HeServiceBuilder::new()
        .set_paillier_parameters(&paillier)
        .set_ckks_parameters(&ckks.build_arc()?)
        .set_bfv_parameters(&bfv.build_arc()?)
        .set_generate_keys(!args.no_keys)
        .build()?;
    log::info!("Service ready, reading requests from the standard input");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(out, "{}", service.handle_json(&line))?;
        out.flush()?;
    }
    Ok(())
}
