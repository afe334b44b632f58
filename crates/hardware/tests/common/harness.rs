use hdu_core::config::Config;
use hdu_core::core::pipeline::traits::PipelineControl;
use hdu_core::stats::HazardStats;
use hdu_core::{
    BranchSignal, ControlSignals, DecodeState, ExecuteState, Hazard, HazardSnapshot, HazardUnit,
    MemoryState,
};
use tracing_subscriber::filter::LevelFilter;

use super::builder::instruction::Instr;

/// Upper bound on cycles for `run`, so a broken model cannot hang a test.
const MAX_CYCLES: usize = 1_000;

/// Installs a test-writer `tracing` subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
}

/// Actions requested by the unit for the current cycle.
#[derive(Clone, Copy, Debug, Default)]
struct Pending {
    hold_pc: bool,
    hold_if_id: bool,
    flush_if_id: bool,
    bubble_id_ex: bool,
}

/// Minimal five-stage pipeline model driven by a real `HazardUnit`.
///
/// Each cycle it snapshots the IF/ID, ID/EX and EX/MEM latches, asks the unit
/// for control signals, applies them through [`PipelineControl`], then advances
/// every latch. Branches resolve in decode and redirect the fetch index.
#[derive(Debug)]
pub struct TestContext {
    pub unit: HazardUnit,
    program: Vec<Instr>,
    /// Index of the next instruction to fetch.
    pub pc: usize,
    pub if_id: Option<Instr>,
    pub id_ex: Option<Instr>,
    pub ex_mem: Option<Instr>,
    pub mem_wb: Option<Instr>,
    /// Instructions that left write-back, in order.
    pub retired: Vec<Instr>,
    /// Per-cycle decisions, in order.
    pub decisions: Vec<(Option<Hazard>, ControlSignals)>,
    pending: Pending,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        Self {
            unit: HazardUnit::new(config),
            program: Vec::new(),
            pc: 0,
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            retired: Vec::new(),
            decisions: Vec::new(),
            pending: Pending::default(),
        }
    }

    /// Loads a program and resets the fetch index.
    pub fn load_program(mut self, program: &[Instr]) -> Self {
        self.program = program.to_vec();
        self.pc = 0;
        self
    }

    /// The snapshot the unit sees this cycle.
    pub fn snapshot(&self) -> HazardSnapshot {
        HazardSnapshot {
            decode: self.if_id.map_or_else(DecodeState::default, |i| DecodeState {
                rs1: i.rs1.into(),
                rs2: i.rs2.into(),
                is_jump: i.is_jump,
            }),
            execute: self.id_ex.map_or_else(ExecuteState::default, |i| ExecuteState {
                rd: i.rd.into(),
                is_load: i.is_load,
            }),
            memory: self.ex_mem.map_or_else(MemoryState::default, |i| MemoryState {
                rd: i.rd.into(),
                is_load: i.is_load,
            }),
            branch: BranchSignal {
                taken: self.if_id.is_some_and(|i| i.target.is_some()),
            },
        }
    }

    /// Advances the model by one clock cycle.
    pub fn step(&mut self) {
        let snapshot = self.snapshot();
        let (hazard, signals) = self
            .unit
            .tick_classified(&snapshot)
            .expect("model only produces in-range registers");
        self.decisions.push((hazard, signals));

        self.pending = Pending::default();
        signals.apply(self);
        let p = self.pending;
        let redirect = self.if_id.and_then(|i| i.target);

        if let Some(done) = self.mem_wb.take() {
            self.retired.push(done);
        }
        self.mem_wb = self.ex_mem.take();
        self.ex_mem = self.id_ex.take();
        self.id_ex = if p.bubble_id_ex { None } else { self.if_id };

        if !p.hold_if_id {
            let fetched = self.program.get(self.pc).copied();
            self.if_id = if p.flush_if_id { None } else { fetched };
        }
        if !p.hold_pc {
            self.pc = match redirect {
                Some(target) if p.flush_if_id => target,
                _ => self.pc + 1,
            };
        }
    }

    /// Runs until the program has been fetched and every latch has drained.
    pub fn run(&mut self) -> &mut Self {
        for _ in 0..MAX_CYCLES {
            self.step();
            if self.is_drained() {
                return self;
            }
        }
        panic!("pipeline did not drain within {MAX_CYCLES} cycles");
    }

    fn is_drained(&self) -> bool {
        self.pc >= self.program.len()
            && self.if_id.is_none()
            && self.id_ex.is_none()
            && self.ex_mem.is_none()
            && self.mem_wb.is_none()
    }

    /// Mnemonics of retired instructions, in order.
    pub fn retired_names(&self) -> Vec<&'static str> {
        self.retired.iter().map(|i| i.name).collect()
    }

    /// Hazards that fired, in cycle order, skipping idle cycles.
    pub fn hazards(&self) -> Vec<Hazard> {
        self.decisions.iter().filter_map(|(h, _)| *h).collect()
    }

    pub fn stats(&self) -> &HazardStats {
        self.unit.stats()
    }
}

impl PipelineControl for TestContext {
    fn hold_pc(&mut self) {
        self.pending.hold_pc = true;
    }

    fn hold_if_id(&mut self) {
        self.pending.hold_if_id = true;
    }

    fn flush_if_id(&mut self) {
        self.pending.flush_if_id = true;
    }

    fn bubble_id_ex(&mut self) {
        self.pending.bubble_id_ex = true;
    }
}
