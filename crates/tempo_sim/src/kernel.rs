//! The event-driven simulation kernel.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tempo_common::{Logic, Value};
use tempo_ir::{
    define_id, RtlDesign, RtlExpr, RtlGate, RtlGateKind, RtlProcess, RtlProcessKind,
    SensitivityKind, StmtId,
};

use crate::error::SimError;
use crate::eval;
use crate::sched::{EventAction, SchedRegion, ScheduledEvent};
use crate::waveform::Waveform;

define_id!(
    /// Handle to a kernel-owned process. Watcher maps hold these instead of
    /// references, breaking the process ↔ watcher ownership cycle.
    ProcessId
);

/// What a kernel process executes when entered.
#[derive(Clone, Copy)]
enum ProcessBody<'d> {
    /// A procedural thread over an IR process's statement chain.
    Thread(&'d RtlProcess),
    /// A continuous assignment: evaluate the rhs, drive the lhs.
    Continuous { lhs: &'d str, rhs: &'d RtlExpr },
    /// A gate primitive: reduce bit 0 of each input, drive the output.
    Gate(&'d RtlGate),
}

/// A kernel process: its scheduling region and its body.
struct SimProcess<'d> {
    region: SchedRegion,
    body: ProcessBody<'d>,
}

/// A deferred operation in the NBA FIFO.
enum NbaOp<'d> {
    /// `signals[name] := value`, applied without triggering watchers.
    Update { name: String, value: Value },
    /// An externally scheduled NBA callback.
    Callback(Box<dyn FnOnce(&mut Kernel<'d>) + 'd>),
}

/// The event-driven simulation kernel.
///
/// Owns the signal store, the Active priority queue, the NBA FIFO, the
/// watcher maps, and the process table. Borrows the loaded
/// [`RtlDesign`] and the attached [`Waveform`] writer; both must outlive
/// the kernel.
///
/// Time is a unitless non-decreasing tick counter; within one time step,
/// events are totally ordered by `(delta, region, push order)`.
pub struct Kernel<'d> {
    cur_time: u64,
    cur_delta: u64,
    seq: u64,
    stopped: bool,
    queue: BinaryHeap<Reverse<ScheduledEvent<'d>>>,
    nba_queue: Vec<NbaOp<'d>>,
    signals: HashMap<String, Value>,
    /// Signal names in registration order, for deterministic waveform dumps.
    tracked: Vec<String>,
    processes: tempo_ir::Arena<ProcessId, SimProcess<'d>>,
    level_watchers: HashMap<String, Vec<ProcessId>>,
    posedge_watchers: HashMap<String, Vec<ProcessId>>,
    negedge_watchers: HashMap<String, Vec<ProcessId>>,
    vcd: Option<&'d mut dyn Waveform>,
}

impl Default for Kernel<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d> Kernel<'d> {
    /// Creates an empty kernel with no design loaded.
    pub fn new() -> Self {
        Self {
            cur_time: 0,
            cur_delta: 0,
            seq: 0,
            stopped: false,
            queue: BinaryHeap::new(),
            nba_queue: Vec::new(),
            signals: HashMap::new(),
            tracked: Vec::new(),
            processes: tempo_ir::Arena::new(),
            level_watchers: HashMap::new(),
            posedge_watchers: HashMap::new(),
            negedge_watchers: HashMap::new(),
            vcd: None,
        }
    }

    /// Attaches a waveform writer. Call before [`load_design`](Self::load_design)
    /// so signals get registered and the header emitted.
    pub fn set_waveform(&mut self, vcd: &'d mut dyn Waveform) {
        self.vcd = Some(vcd);
    }

    /// Loads a design: clears all kernel state, initializes every declared
    /// signal to all-X at its declared width, builds processes, registers
    /// watchers, and schedules each process once at `(0, Active)`.
    pub fn load_design(&mut self, design: &'d RtlDesign) -> Result<(), SimError> {
        self.cur_time = 0;
        self.cur_delta = 0;
        self.seq = 0;
        self.stopped = false;
        self.queue.clear();
        self.nba_queue.clear();
        self.signals.clear();
        self.tracked.clear();
        self.processes = tempo_ir::Arena::new();
        self.level_watchers.clear();
        self.posedge_watchers.clear();
        self.negedge_watchers.clear();

        for module in &design.modules {
            for net in &module.nets {
                let width = net.ty.bit_width();
                self.signals
                    .insert(net.name.clone(), Value::unknown(width));
                self.tracked.push(net.name.clone());
            }
        }

        if let Some(vcd) = self.vcd.as_mut() {
            for module in &design.modules {
                for net in &module.nets {
                    vcd.add_signal(&net.name, net.ty.bit_width())?;
                }
            }
            vcd.emit_header()?;
        }

        for module in &design.modules {
            for assign in &module.continuous_assigns {
                let pid = self.processes.alloc(SimProcess {
                    region: SchedRegion::Active,
                    body: ProcessBody::Continuous {
                        lhs: &assign.lhs_name,
                        rhs: &assign.rhs,
                    },
                });
                let watchers = &mut self.level_watchers;
                assign.rhs.for_each_ref(&mut |name| {
                    watchers.entry(name.to_string()).or_default().push(pid);
                });
                self.push_event(0, SchedRegion::Active, EventAction::Enter(pid));
            }

            for process in &module.processes {
                let pid = self.processes.alloc(SimProcess {
                    region: SchedRegion::Active,
                    body: ProcessBody::Thread(process),
                });
                if process.kind == RtlProcessKind::Always {
                    self.register_sensitivity(process, pid);
                }
                self.push_event(0, SchedRegion::Active, EventAction::Enter(pid));
            }

            for gate in &module.gates {
                let pid = self.processes.alloc(SimProcess {
                    region: SchedRegion::Active,
                    body: ProcessBody::Gate(gate),
                });
                for input in &gate.inputs {
                    self.level_watchers
                        .entry(input.clone())
                        .or_default()
                        .push(pid);
                }
                self.push_event(0, SchedRegion::Active, EventAction::Enter(pid));
            }
        }

        Ok(())
    }

    /// Registers watcher entries for an always process's sensitivity list.
    ///
    /// The synthetic `Level("*")` entry expands to a level watch on every
    /// identifier referenced by the body's right-hand sides and delay
    /// expressions.
    fn register_sensitivity(&mut self, process: &'d RtlProcess, pid: ProcessId) {
        for sens in &process.sensitivity {
            if sens.is_star() {
                let mut referenced = HashSet::new();
                for stmt in process.stmts.values() {
                    if let Some(rhs) = &stmt.rhs {
                        rhs.for_each_ref(&mut |name| {
                            referenced.insert(name.to_string());
                        });
                    }
                    if let Some(delay) = &stmt.delay_expr {
                        delay.for_each_ref(&mut |name| {
                            referenced.insert(name.to_string());
                        });
                    }
                }
                for name in referenced {
                    self.level_watchers.entry(name).or_default().push(pid);
                }
            } else {
                let map = match sens.kind {
                    SensitivityKind::Level => &mut self.level_watchers,
                    SensitivityKind::Posedge => &mut self.posedge_watchers,
                    SensitivityKind::Negedge => &mut self.negedge_watchers,
                };
                map.entry(sens.signal.clone()).or_default().push(pid);
            }
        }
    }

    /// Current simulation time.
    pub fn time(&self) -> u64 {
        self.cur_time
    }

    /// Delta count within the current time step.
    pub fn delta(&self) -> u64 {
        self.cur_delta
    }

    /// Returns `true` once `$finish` or [`request_stop`](Self::request_stop)
    /// has halted the kernel.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Requests an orderly stop: no further Active or NBA iteration;
    /// pending events are retained but never executed.
    pub fn request_stop(&mut self) {
        self.stopped = true;
    }

    /// Writes a signal directly, bypassing scheduling, watchers, and width
    /// coercion. Intended for tests and DPI.
    pub fn set_signal(&mut self, name: &str, value: Value) {
        self.signals.insert(name.to_string(), value);
    }

    /// Reads a signal's current value.
    pub fn get_signal(&self, name: &str) -> Option<&Value> {
        self.signals.get(name)
    }

    /// Enqueues a callback in the Active queue at `cur_time + delay`.
    pub fn schedule(
        &mut self,
        callback: impl FnOnce(&mut Kernel<'d>) + 'd,
        delay: u64,
        region: SchedRegion,
    ) {
        self.push_event(delay, region, EventAction::Callback(Box::new(callback)));
    }

    /// Enqueues a callback in the NBA FIFO of the current time step.
    pub fn schedule_nba(&mut self, callback: impl FnOnce(&mut Kernel<'d>) + 'd) {
        self.nba_queue.push(NbaOp::Callback(Box::new(callback)));
    }

    fn push_event(&mut self, delay: u64, region: SchedRegion, action: EventAction<'d>) {
        let delta = if delay == 0 { self.cur_delta } else { 0 };
        self.seq += 1;
        self.queue.push(Reverse(ScheduledEvent {
            time: self.cur_time + delay,
            delta,
            region,
            seq: self.seq,
            action,
        }));
    }

    /// Drives a signal.
    ///
    /// With `nba` set, the update is deferred to the NBA FIFO of the
    /// current time step and applied as a raw store. Otherwise the write is
    /// immediate: the value is coerced to the signal's stored width,
    /// identical writes are suppressed without side effects, and watchers
    /// are scheduled — level watchers on any change, edge watchers on the
    /// matching bit-0 transition.
    pub fn drive(&mut self, name: &str, value: Value, nba: bool) {
        if nba {
            self.nba_queue.push(NbaOp::Update {
                name: name.to_string(),
                value,
            });
            return;
        }

        let (old_bit, value) = match self.signals.get(name) {
            Some(existing) => {
                let value = if value.width() == existing.width() {
                    value
                } else {
                    value.with_width(existing.width())
                };
                if *existing == value {
                    return;
                }
                let old_bit = if existing.width() > 0 {
                    existing.get(0)
                } else {
                    Logic::X
                };
                (old_bit, value)
            }
            None => (Logic::X, value),
        };

        let new_bit = if value.width() > 0 { value.get(0) } else { Logic::X };
        self.signals.insert(name.to_string(), value);

        self.trigger_watchers(name, SensitivityKind::Level);
        if old_bit == Logic::Zero && new_bit == Logic::One {
            self.trigger_watchers(name, SensitivityKind::Posedge);
        }
        if old_bit == Logic::One && new_bit == Logic::Zero {
            self.trigger_watchers(name, SensitivityKind::Negedge);
        }
    }

    fn trigger_watchers(&mut self, name: &str, kind: SensitivityKind) {
        let map = match kind {
            SensitivityKind::Level => &self.level_watchers,
            SensitivityKind::Posedge => &self.posedge_watchers,
            SensitivityKind::Negedge => &self.negedge_watchers,
        };
        let pids: Vec<ProcessId> = match map.get(name) {
            Some(pids) => pids.clone(),
            None => return,
        };
        for pid in pids {
            let region = self.processes[pid].region;
            self.push_event(0, region, EventAction::Enter(pid));
        }
    }

    fn dispatch(&mut self, action: EventAction<'d>) {
        match action {
            EventAction::Enter(pid) => self.run_process(pid),
            EventAction::Resume { process, stmt } => self.run_thread(process, stmt),
            EventAction::Callback(callback) => callback(self),
        }
    }

    fn run_process(&mut self, pid: ProcessId) {
        match self.processes[pid].body {
            ProcessBody::Thread(process) => self.run_thread(pid, process.first_stmt),
            ProcessBody::Continuous { lhs, rhs } => {
                let value = eval::eval_expr(&self.signals, rhs);
                self.drive(lhs, value, false);
            }
            ProcessBody::Gate(gate) => {
                let value = self.eval_gate(gate);
                self.drive(&gate.output, value, false);
            }
        }
    }

    /// Executes a procedural thread from `start` until it suspends at a
    /// delay, finishes, or falls off the end of its chain.
    ///
    /// Falling off the end of an `always` chain with an empty sensitivity
    /// list restarts the thread from its entry point (the free-running
    /// self-delay loop, e.g. `always #5 clk = ~clk;`); any other process
    /// simply terminates and waits for its watchers.
    fn run_thread(&mut self, pid: ProcessId, start: Option<StmtId>) {
        let ProcessBody::Thread(process) = self.processes[pid].body else {
            return;
        };
        let mut cur = start;
        loop {
            let Some(id) = cur else {
                let free_running = process.kind == RtlProcessKind::Always
                    && process.sensitivity.is_empty()
                    && process.first_stmt.is_some();
                if !free_running {
                    return;
                }
                cur = process.first_stmt;
                continue;
            };
            let stmt = process.stmts.get(id);
            match stmt.kind {
                tempo_ir::RtlStmtKind::BlockingAssign => {
                    let value = match &stmt.rhs {
                        Some(rhs) => eval::eval_expr(&self.signals, rhs),
                        None => Value::unknown(1),
                    };
                    self.drive(&stmt.lhs_name, value, false);
                    cur = stmt.next;
                }
                tempo_ir::RtlStmtKind::NonBlockingAssign => {
                    let value = match &stmt.rhs {
                        Some(rhs) => eval::eval_expr(&self.signals, rhs),
                        None => Value::unknown(1),
                    };
                    self.drive(&stmt.lhs_name, value, true);
                    cur = stmt.next;
                }
                tempo_ir::RtlStmtKind::Delay => {
                    let ticks = match &stmt.delay_expr {
                        Some(expr) => eval::eval_delay(&self.signals, expr),
                        None => 0,
                    };
                    let resume = stmt.delay_stmt.or(stmt.next);
                    self.push_event(
                        ticks,
                        SchedRegion::Active,
                        EventAction::Resume {
                            process: pid,
                            stmt: resume,
                        },
                    );
                    return;
                }
                tempo_ir::RtlStmtKind::Finish => {
                    self.stopped = true;
                    return;
                }
            }
        }
    }

    fn eval_gate(&self, gate: &RtlGate) -> Value {
        let bit = |name: &String| {
            self.signals
                .get(name)
                .filter(|v| v.width() > 0)
                .map(|v| v.get(0))
                .unwrap_or(Logic::X)
        };
        let and_all = || gate.inputs.iter().fold(Logic::One, |acc, i| acc & bit(i));
        let or_all = || gate.inputs.iter().fold(Logic::Zero, |acc, i| acc | bit(i));
        let xor_all = || gate.inputs.iter().fold(Logic::Zero, |acc, i| acc ^ bit(i));
        let first = || gate.inputs.first().map(bit).unwrap_or(Logic::X);

        let out = match gate.kind {
            RtlGateKind::And => and_all(),
            RtlGateKind::Nand => !and_all(),
            RtlGateKind::Or => or_all(),
            RtlGateKind::Nor => !or_all(),
            RtlGateKind::Xor => xor_all(),
            RtlGateKind::Xnor => !xor_all(),
            RtlGateKind::Not => !first(),
            RtlGateKind::Buf => first(),
        };
        Value::filled(1, out)
    }

    fn emit_waveform(&mut self, time: u64) -> Result<(), SimError> {
        let Some(vcd) = self.vcd.as_mut() else {
            return Ok(());
        };
        vcd.emit_time(time)?;
        for name in &self.tracked {
            if let Some(value) = self.signals.get(name) {
                vcd.emit_value(name, value)?;
            }
        }
        Ok(())
    }

    /// Runs the event loop.
    ///
    /// Consumes events in non-decreasing time order until the queue
    /// empties, the stop flag is set, or the next event's time exceeds
    /// `max_time` (`max_time == 0` means unbounded). At each visited time
    /// step the Active group drains fully, then the NBA FIFO applies in
    /// push order, then any reserved-region stragglers run; the waveform
    /// dump happens once before the events and once after.
    pub fn run(&mut self, max_time: u64) -> Result<(), SimError> {
        let unlimited = max_time == 0;

        loop {
            if self.stopped {
                break;
            }
            let Some(next_time) = self.queue.peek().map(|Reverse(e)| e.time) else {
                break;
            };
            if !unlimited && next_time > max_time {
                break;
            }

            let t = next_time;
            self.cur_time = t;
            self.cur_delta = 0;
            self.emit_waveform(t)?;

            let mut progressed = false;

            // Active group: Preponed/Active/Inactive at this time.
            loop {
                let runnable = matches!(
                    self.queue.peek(),
                    Some(Reverse(ev)) if ev.time == t && ev.region.is_active_group()
                );
                if !runnable {
                    break;
                }
                let Reverse(ev) = self.queue.pop().expect("peeked event");
                self.cur_delta += 1;
                progressed = true;
                self.dispatch(ev.action);
                if self.stopped {
                    break;
                }
            }
            if self.stopped {
                break;
            }

            // NBA region: apply this time step's deferred updates in push
            // order. Updates are raw stores; they do not trigger watchers.
            let pending = std::mem::take(&mut self.nba_queue);
            progressed |= !pending.is_empty();
            for op in pending {
                match op {
                    NbaOp::Update { name, value } => {
                        let value = match self.signals.get(&name) {
                            Some(existing) if existing.width() != value.width() => {
                                value.with_width(existing.width())
                            }
                            _ => value,
                        };
                        self.signals.insert(name, value);
                    }
                    NbaOp::Callback(callback) => callback(self),
                }
            }
            if self.stopped {
                break;
            }

            // Reserved regions (NBA/Postponed events in the queue): run the
            // oldest so the wheel cannot wedge on them.
            if !progressed {
                if let Some(Reverse(ev)) = self.queue.pop() {
                    self.cur_delta += 1;
                    self.dispatch(ev.action);
                    if self.stopped {
                        break;
                    }
                }
            }

            self.emit_waveform(t)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempo_ast::{DataType, DataTypeKind};
    use tempo_ir::{RtlAssign, RtlAssignKind, RtlModule, RtlNet, RtlSensitivity, RtlStmt};

    fn net(name: &str, width: u32) -> RtlNet {
        let ty = if width == 1 {
            DataType::scalar(DataTypeKind::Logic)
        } else {
            DataType::packed(DataTypeKind::Logic, width as i32 - 1, 0)
        };
        RtlNet {
            name: name.into(),
            ty,
        }
    }

    fn design_with(module: RtlModule) -> RtlDesign {
        RtlDesign {
            modules: vec![module],
        }
    }

    fn initial_process(stmts: impl FnOnce(&mut RtlProcess)) -> RtlProcess {
        let mut p = RtlProcess::new(RtlProcessKind::Initial);
        stmts(&mut p);
        p
    }

    #[test]
    fn load_initializes_signals_to_x_at_declared_width() {
        let mut m = RtlModule::new("top");
        m.nets.push(net("clk", 1));
        m.nets.push(net("data", 8));
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        let clk = kernel.get_signal("clk").unwrap();
        assert_eq!(clk.width(), 1);
        assert_eq!(clk.get(0), Logic::X);
        let data = kernel.get_signal("data").unwrap();
        assert_eq!(data.width(), 8);
        assert!((0..8).all(|i| data.get(i) == Logic::X));
    }

    #[test]
    fn continuous_assign_settles_at_time_zero() {
        // assign y = a; with a driven at t = 0.
        let mut m = RtlModule::new("top");
        m.nets.push(net("a", 1));
        m.nets.push(net("y", 1));
        m.continuous_assigns.push(RtlAssign {
            kind: RtlAssignKind::Continuous,
            lhs_name: "y".into(),
            rhs: RtlExpr::reference("a"),
        });
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.schedule(
            |k| k.drive("a", Value::from_bool(true), false),
            0,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();
        assert_eq!(kernel.get_signal("y").unwrap().to_uint(), 1);
    }

    #[test]
    fn monotonic_time_across_run() {
        let times = Rc::new(RefCell::new(Vec::new()));
        let mut kernel = Kernel::new();
        for delay in [7u64, 3, 3, 0, 12] {
            let times = Rc::clone(&times);
            kernel.schedule(
                move |k| times.borrow_mut().push(k.time()),
                delay,
                SchedRegion::Active,
            );
        }
        kernel.run(0).unwrap();
        let times = times.borrow();
        assert_eq!(*times, vec![0, 3, 3, 7, 12]);
    }

    #[test]
    fn same_bucket_runs_in_push_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut kernel = Kernel::<'_>::new();
        for tag in 0..4 {
            let order = Rc::clone(&order);
            kernel.schedule(move |_| order.borrow_mut().push(tag), 5, SchedRegion::Active);
        }
        kernel.run(0).unwrap();
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn nba_write_not_observed_by_active_at_same_time() {
        let mut m = RtlModule::new("top");
        m.nets.push(net("q", 1));
        let design = design_with(m);

        let observed = Rc::new(RefCell::new(None));
        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.set_signal("q", Value::from_bool(false));

        kernel.schedule(
            |k| k.drive("q", Value::from_bool(true), true),
            5,
            SchedRegion::Active,
        );
        let obs = Rc::clone(&observed);
        kernel.schedule(
            move |k| *obs.borrow_mut() = Some(k.get_signal("q").unwrap().clone()),
            5,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();

        // The second Active event still saw the pre-NBA value.
        assert_eq!(observed.borrow().as_ref().unwrap().to_uint(), 0);
        // After the NBA drain the write is visible.
        assert_eq!(kernel.get_signal("q").unwrap().to_uint(), 1);
    }

    #[test]
    fn nba_updates_apply_in_push_order() {
        let mut m = RtlModule::new("top");
        m.nets.push(net("q", 1));
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.schedule(
            |k| {
                k.drive("q", Value::from_bool(false), true);
                k.drive("q", Value::from_bool(true), true);
            },
            1,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();
        // Two NBA writes in the same window: the later one wins.
        assert_eq!(kernel.get_signal("q").unwrap().to_uint(), 1);
    }

    #[test]
    fn glitch_suppression_skips_watchers() {
        // assign y = ~a; then corrupt y and re-drive a with its stored
        // value: the identical write must not re-trigger the assign.
        let mut m = RtlModule::new("top");
        m.nets.push(net("a", 1));
        m.nets.push(net("y", 1));
        m.continuous_assigns.push(RtlAssign {
            kind: RtlAssignKind::Continuous,
            lhs_name: "y".into(),
            rhs: RtlExpr::unary(tempo_ir::RtlUnaryOp::BitNot, RtlExpr::reference("a")),
        });
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.schedule(
            |k| k.drive("a", Value::from_bool(false), false),
            0,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();
        assert_eq!(kernel.get_signal("y").unwrap().to_uint(), 1);

        kernel.set_signal("y", Value::from_bool(false));
        kernel.schedule(
            |k| k.drive("a", Value::from_bool(false), false),
            1,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();
        // Identical drive suppressed: the assign never re-ran.
        assert_eq!(kernel.get_signal("y").unwrap().to_uint(), 0);
    }

    #[test]
    fn set_signal_bypasses_watchers() {
        let mut m = RtlModule::new("top");
        m.nets.push(net("a", 1));
        m.nets.push(net("y", 1));
        m.continuous_assigns.push(RtlAssign {
            kind: RtlAssignKind::Continuous,
            lhs_name: "y".into(),
            rhs: RtlExpr::reference("a"),
        });
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.run(0).unwrap();

        kernel.set_signal("a", Value::from_bool(true));
        kernel.run(0).unwrap();
        // No event was scheduled, so y never tracked the bypass write.
        assert_ne!(kernel.get_signal("y").unwrap().to_uint(), 1);
    }

    #[test]
    fn drive_coerces_to_stored_width() {
        let mut m = RtlModule::new("top");
        m.nets.push(net("clk", 1));
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.schedule(
            |k| k.drive("clk", Value::from_uint(32, 0), false),
            0,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();
        assert_eq!(kernel.get_signal("clk").unwrap().width(), 1);
    }

    #[test]
    fn edge_watchers_fire_on_matching_transition() {
        // always @(posedge clk) q <= 1;
        let mut process = RtlProcess::new(RtlProcessKind::Always);
        process.sensitivity.push(RtlSensitivity::posedge("clk"));
        let head = process
            .stmts
            .alloc(RtlStmt::non_blocking("q", RtlExpr::literal("1"), None));
        process.first_stmt = Some(head);

        let mut m = RtlModule::new("top");
        m.nets.push(net("clk", 1));
        m.nets.push(net("q", 1));
        m.processes.push(process);
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.schedule(
            |k| k.drive("clk", Value::from_bool(false), false),
            1,
            SchedRegion::Active,
        );
        kernel.schedule(
            |k| k.drive("clk", Value::from_bool(true), false),
            5,
            SchedRegion::Active,
        );
        kernel.run(3).unwrap();
        // X→0 is not a posedge; the initial entry at t=0 queued q <= 1
        // from the load-time execution, so force q back to a known state.
        kernel.set_signal("q", Value::from_bool(false));
        kernel.run(0).unwrap();
        // 0→1 at t=5 fires the posedge watcher.
        assert_eq!(kernel.get_signal("q").unwrap().to_uint(), 1);
    }

    #[test]
    fn delay_suspends_and_resumes() {
        // initial begin a = 1; #3 a = 0; end
        let mut m = RtlModule::new("top");
        m.nets.push(net("a", 1));
        let process = initial_process(|p| {
            let second = p
                .stmts
                .alloc(RtlStmt::blocking("a", RtlExpr::literal("0"), None));
            let delay = p
                .stmts
                .alloc(RtlStmt::delay(RtlExpr::literal("3"), Some(second), None));
            let first = p
                .stmts
                .alloc(RtlStmt::blocking("a", RtlExpr::literal("1"), Some(delay)));
            p.first_stmt = Some(first);
        });
        m.processes.push(process);
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.run(2).unwrap();
        assert_eq!(kernel.get_signal("a").unwrap().to_uint(), 1);
        kernel.run(3).unwrap();
        assert_eq!(kernel.get_signal("a").unwrap().to_uint(), 0);
        assert_eq!(kernel.time(), 3);
    }

    #[test]
    fn finish_stops_and_retains_pending_events() {
        let mut m = RtlModule::new("top");
        m.nets.push(net("a", 1));
        let process = initial_process(|p| {
            let fin = p.stmts.alloc(RtlStmt::finish(None));
            let delay = p
                .stmts
                .alloc(RtlStmt::delay(RtlExpr::literal("10"), Some(fin), None));
            p.first_stmt = Some(delay);
        });
        m.processes.push(process);
        let design = design_with(m);

        let hit = Rc::new(RefCell::new(false));
        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        let flag = Rc::clone(&hit);
        kernel.schedule(move |_| *flag.borrow_mut() = true, 20, SchedRegion::Active);

        kernel.run(0).unwrap();
        assert!(kernel.is_stopped());
        assert_eq!(kernel.time(), 10);
        // The t=20 event was retained, not executed.
        assert!(!*hit.borrow());
        kernel.run(0).unwrap();
        assert!(!*hit.borrow());
    }

    #[test]
    fn free_running_always_toggles() {
        // always #5 clk = ~clk; plus an initial clk = 0.
        let mut m = RtlModule::new("top");
        m.nets.push(net("clk", 1));
        m.processes.push(initial_process(|p| {
            let head = p
                .stmts
                .alloc(RtlStmt::blocking("clk", RtlExpr::literal("0"), None));
            p.first_stmt = Some(head);
        }));
        let mut toggler = RtlProcess::new(RtlProcessKind::Always);
        let assign = toggler.stmts.alloc(RtlStmt::blocking(
            "clk",
            RtlExpr::unary(tempo_ir::RtlUnaryOp::BitNot, RtlExpr::reference("clk")),
            None,
        ));
        let delay = toggler
            .stmts
            .alloc(RtlStmt::delay(RtlExpr::literal("5"), Some(assign), None));
        toggler.first_stmt = Some(delay);
        m.processes.push(toggler);
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        for (bound, expected) in [(4u64, 0u64), (9, 1), (14, 0), (19, 1), (20, 0)] {
            kernel.run(bound).unwrap();
            assert_eq!(
                kernel.get_signal("clk").unwrap().to_uint(),
                expected,
                "clk at t <= {bound}"
            );
        }
    }

    #[test]
    fn gate_process_drives_output() {
        let mut m = RtlModule::new("top");
        m.nets.push(net("a", 1));
        m.nets.push(net("b", 1));
        m.nets.push(net("y", 1));
        m.gates.push(RtlGate {
            kind: RtlGateKind::Xor,
            inputs: vec!["a".into(), "b".into()],
            output: "y".into(),
        });
        let design = design_with(m);

        let mut kernel = Kernel::new();
        kernel.load_design(&design).unwrap();
        kernel.schedule(
            |k| {
                k.drive("a", Value::from_bool(true), false);
                k.drive("b", Value::from_bool(false), false);
            },
            0,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();
        assert_eq!(kernel.get_signal("y").unwrap().to_uint(), 1);

        kernel.schedule(
            |k| k.drive("b", Value::from_bool(true), false),
            1,
            SchedRegion::Active,
        );
        kernel.run(0).unwrap();
        assert_eq!(kernel.get_signal("y").unwrap().to_uint(), 0);
    }

    #[test]
    fn reserved_region_event_does_not_wedge_the_wheel() {
        let ran = Rc::new(RefCell::new(false));
        let mut kernel = Kernel::<'_>::new();
        let flag = Rc::clone(&ran);
        kernel.schedule(move |_| *flag.borrow_mut() = true, 2, SchedRegion::Postponed);
        kernel.run(0).unwrap();
        assert!(*ran.borrow());
    }

    #[test]
    fn schedule_nba_callback_runs_after_actives() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut kernel = Kernel::<'_>::new();
        let o1 = Rc::clone(&order);
        let o2 = Rc::clone(&order);
        kernel.schedule(
            move |k| {
                let o = Rc::clone(&o1);
                k.schedule_nba(move |_| o.borrow_mut().push("nba"));
                o1.borrow_mut().push("active1");
            },
            3,
            SchedRegion::Active,
        );
        kernel.schedule(move |_| o2.borrow_mut().push("active2"), 3, SchedRegion::Active);
        kernel.run(0).unwrap();
        assert_eq!(*order.borrow(), vec!["active1", "active2", "nba"]);
    }

    #[test]
    fn request_stop_halts_the_loop() {
        let mut kernel = Kernel::<'_>::new();
        kernel.schedule(|k| k.request_stop(), 1, SchedRegion::Active);
        let hit = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&hit);
        kernel.schedule(move |_| *flag.borrow_mut() = true, 5, SchedRegion::Active);
        kernel.run(0).unwrap();
        assert!(kernel.is_stopped());
        assert!(!*hit.borrow());
    }

    #[test]
    fn delta_resets_each_time_step() {
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let mut kernel = Kernel::<'_>::new();
        for delay in [1u64, 1, 4] {
            let deltas = Rc::clone(&deltas);
            kernel.schedule(
                move |k| deltas.borrow_mut().push((k.time(), k.delta())),
                delay,
                SchedRegion::Active,
            );
        }
        kernel.run(0).unwrap();
        assert_eq!(*deltas.borrow(), vec![(1, 1), (1, 2), (4, 1)]);
    }
}
