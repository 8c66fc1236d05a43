//! Plain-text wire diagram of a circuit.

use crate::gate::GateKind;
use crate::operation::GateOperation;

/// Render one line per qubit, one column per operation.
///
/// ```text
/// q0: ─H──●─
/// q1: ────⊕─
/// ```
pub fn render(qubit_count: u32, operations: &[GateOperation]) -> String {
    let mut lines: Vec<String> = (0..qubit_count).map(|q| format!("q{q}: ")).collect();

    for op in operations {
        let (lo, hi) = op
            .qubits()
            .fold((u32::MAX, 0), |(lo, hi), q| (lo.min(q.0), hi.max(q.0)));

        for (q, line) in (0..qubit_count).zip(lines.iter_mut()) {
            let symbol = if op.controls.iter().any(|c| c.0 == q) {
                '●'
            } else if op.targets.iter().any(|t| t.0 == q) {
                match op.name {
                    GateKind::CX => '⊕',
                    kind => kind.label().chars().next().unwrap_or('?'),
                }
            } else if q > lo && q < hi {
                '┼'
            } else {
                '─'
            };
            line.push('─');
            line.push(symbol);
            line.push('─');
        }
    }

    lines.join("\n")
}
