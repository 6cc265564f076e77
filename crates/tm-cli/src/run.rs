use std::time::{Duration, Instant};

use tm_fill::operands;
use tm_tensor::{verify, MatmulBackend, Matrix, SerialBackend, TiledBackend, VerifyReport};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::error::Result;

/// Result of one generate, multiply, verify pass.
#[derive(Debug)]
pub struct Outcome {
    pub report: VerifyReport,
    pub kernel_time: Duration,
    pub reference_time: Duration,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.report.passed()
    }

    /// The line printed on stdout.
    pub fn verdict(&self) -> &'static str {
        if self.passed() {
            "SUCCESS"
        } else {
            "FAILURE"
        }
    }
}

/// Owns the backends used for one run.
#[derive(Debug)]
pub struct RunContext {
    pub kernel: Box<dyn MatmulBackend>,
    pub reference: Box<dyn MatmulBackend>,
}

impl RunContext {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            kernel: Box::new(TiledBackend::new(config.grid.block())),
            reference: Box::new(SerialBackend::new()),
        }
    }

    /// Generate operands, run the kernel, then check it against the reference.
    pub fn run(&self, config: &RunConfig) -> Result<Outcome> {
        let n = config.grid.dim();
        info!(
            grid = %config.grid,
            seed = config.seed,
            fill_a = %config.fill_a,
            fill_b = %config.fill_b,
            "generating operands"
        );
        let (a, b) = operands(config.fill_a, config.fill_b, config.seed, n);
        self.run_with(&a, &b, config.tolerance)
    }

    /// Run the kernel on the given operands and verify the result.
    pub fn run_with(&self, a: &Matrix, b: &Matrix, tolerance: f32) -> Result<Outcome> {
        let start = Instant::now();
        let mut c = Matrix::zeros(a.dim());
        self.kernel.matmul_into(a, b, &mut c)?;
        let kernel_time = start.elapsed();
        info!(backend = self.kernel.name(), ?kernel_time, "kernel finished");

        let start = Instant::now();
        let gold = self.reference.matmul(a, b)?;
        let reference_time = start.elapsed();
        info!(backend = self.reference.name(), ?reference_time, "reference finished");

        let report = verify(&c, &gold, tolerance)?;
        if report.passed() {
            info!("{}", report);
        } else {
            warn!("{}", report);
        }

        Ok(Outcome {
            report,
            kernel_time,
            reference_time,
        })
    }
}

/// Convenience wrapper: build a context for `config` and run it.
pub fn run(config: &RunConfig) -> Result<Outcome> {
    RunContext::new(config).run(config)
}
