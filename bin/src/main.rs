#[macro_use]
extern crate log;

use baker_core::app::*;
use baker_core::bake::Baker;
use baker_core::error::BakeError;
use baker_core::low_discrepancy::HammersleySequence;
use bakers::*;
use clap::CommandFactory;

#[cfg(all(feature = "dhat-rs", feature = "jemalloc"))]
compile_error!("feature 'dhat-rs' and feature 'jemalloc' cannot be enabled at the same time");

#[cfg(feature = "dhat-rs")]
use dhat::{Dhat, DhatAlloc};

#[cfg(feature = "dhat-rs")]
#[global_allocator]
static ALLOCATOR: DhatAlloc = DhatAlloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static ALLOCATOR: Jemalloc = Jemalloc;

fn main() {
    #[cfg(feature = "dhat-rs")]
    let _dhat = Dhat::start_heap_profiling();

    // Initialize `env_logger`.
    env_logger::init();

    let options = match Options::parse_selection(std::env::args_os()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            if let Err(e) = Options::command().print_help() {
                error!("{e}");
            }
            return;
        }
        Err(e) => e.exit(),
    };

    let operations = options.operations();
    if let Err(e) = run(&options, &operations) {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Per-run state shared between bake operations.
#[derive(Default)]
struct Context {
    sequence: HammersleySequence,
    blackbody: BlackbodyIntegrator,
    gloss_normal: GlossNormal,
}

fn run(options: &Options, operations: &[BakeOperation]) -> Result<(), BakeError> {
    let baker = Baker::new(&options.out_dir, options.quiet)?;
    let mut ctx = Context::default();

    for op in operations {
        info!("Running {op} bake");
        match op {
            BakeOperation::TestPattern => bake_test_pattern(&baker)?,
            BakeOperation::MultiscatterBrdf => bake_multiscatter_brdf(&baker)?,
            BakeOperation::EnvBrdf => bake_env_brdf(&baker, &mut ctx.sequence)?,
            BakeOperation::Noise => bake_noise(&baker)?,
            BakeOperation::Blackbody => bake_blackbody(&baker, &mut ctx.blackbody)?,
            BakeOperation::GlossNormal => bake_gloss_normal(&baker, &mut ctx.gloss_normal, &mut ctx.sequence)?,
            BakeOperation::Subsurface => bake_subsurface(&baker)?,
        }
    }

    info!("Done");
    Ok(())
}
