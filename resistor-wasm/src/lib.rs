use wasm_bindgen::prelude::*;
use resistor_core::{RunConfig, SolverCore};

#[wasm_bindgen]
pub struct Solver {
    inner: SolverCore,
}

#[wasm_bindgen]
impl Solver {
    #[wasm_bindgen(constructor)]
    pub fn new(n: usize, niter: usize) -> Result<Solver, JsValue> {
        let cfg = RunConfig::new(n, niter).with_verbose(false);
        let inner = SolverCore::new(cfg).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Solver { inner })
    }

    pub fn n(&self) -> usize { self.inner.n() }
    pub fn mu(&self) -> f64 { self.inner.relaxation().mu() }
    pub fn om(&self) -> f64 { self.inner.relaxation().om() }

    pub fn columns(&self) -> usize { self.inner.grid().columns() }
    pub fn rows(&self) -> usize { self.inner.grid().rows() }

    pub fn iterations(&self) -> usize { self.inner.iterations() }
    pub fn is_done(&self) -> bool { self.inner.is_done() }
    pub fn resistance(&self) -> f64 { self.inner.resistance() }

    pub fn reset(&mut self) { self.inner.clear(); }

    // Copy-based JS access (reliable)
    pub fn get_field(&self) -> Vec<f64> {
        self.inner.clone_field()
    }

    // One red+black iteration + timing (WASM-only). `None` once niter is reached.
    pub fn step(&mut self) -> Option<StepInfo> {
        let t0 = now_ms();
        let report = self.inner.step()?;
        let t1 = now_ms();
        Some(StepInfo { iter: report.iter, r: report.r, compute_ms: t1 - t0 })
    }
}

#[wasm_bindgen]
pub struct StepInfo {
    iter: usize,
    r: f64,
    compute_ms: f64,
}

#[wasm_bindgen]
impl StepInfo {
    pub fn iter(&self) -> usize { self.iter }
    pub fn r(&self) -> f64 { self.r }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}


fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
