//! Text rendering of circuits
//!
//! One line per qubit wire and one per classical register, one column per
//! instruction. Vertical connectors mark which wires an instruction spans.

use crate::quantum::circuit::{Instruction, QuantumCircuit};
use crate::quantum::gate::StandardGate;

const QUANTUM_FILL: char = '─';
const CLASSICAL_FILL: char = '═';

/// Render `circuit` as a multi-line text diagram
pub fn draw(circuit: &QuantumCircuit) -> String {
    let nq = circuit.num_qubits();
    let rows = nq + circuit.cregs().len();

    let mut labels: Vec<String> = Vec::with_capacity(rows);
    for reg in circuit.qregs() {
        for i in 0..reg.size {
            labels.push(format!("{}_{}: ", reg.name, i));
        }
    }
    for reg in circuit.cregs() {
        labels.push(format!("{}: {}/", reg.name, reg.size));
    }

    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut lines: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(row, label)| {
            let mut line = " ".repeat(label_width - label.chars().count());
            line.push_str(label);
            line.push(fill_for(row, nq));
            line
        })
        .collect();

    for inst in circuit.instructions() {
        let cells = column(circuit, inst, rows);
        let width = cells
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(1)
            + 2;

        for (row, cell) in cells.iter().enumerate() {
            let fill = fill_for(row, nq);
            lines[row].push_str(&center(cell.as_deref(), width, fill));
        }
    }

    for (row, line) in lines.iter_mut().enumerate() {
        line.push(fill_for(row, nq));
    }

    lines.join("\n")
}

fn fill_for(row: usize, qubit_rows: usize) -> char {
    if row < qubit_rows {
        QUANTUM_FILL
    } else {
        CLASSICAL_FILL
    }
}

fn center(symbol: Option<&str>, width: usize, fill: char) -> String {
    let symbol = symbol.unwrap_or("");
    let len = symbol.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;

    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(symbol);
    out.extend(std::iter::repeat(fill).take(right));
    out
}

/// Register row and local index of a global classical bit
fn clbit_row(circuit: &QuantumCircuit, clbit: usize) -> (usize, usize) {
    let offsets = circuit.creg_offsets();
    let reg = circuit
        .cregs()
        .iter()
        .zip(&offsets)
        .position(|(r, &offset)| clbit >= offset && clbit < offset + r.size)
        .unwrap_or(0);
    (circuit.num_qubits() + reg, clbit - offsets[reg])
}

/// Fill every empty row strictly between `from` and `to` with a connector
fn connect(cells: &mut [Option<String>], from: usize, to: usize, qubit_rows: usize, double: bool) {
    let (lo, hi) = if from < to { (from, to) } else { (to, from) };
    for (row, cell) in cells.iter_mut().enumerate().take(hi).skip(lo + 1) {
        if cell.is_none() {
            let symbol = match (row < qubit_rows, double) {
                (true, false) => "┼",
                (false, false) => "╪",
                (true, true) => "╫",
                (false, true) => "╬",
            };
            *cell = Some(symbol.to_string());
        }
    }
}

fn column(circuit: &QuantumCircuit, inst: &Instruction, rows: usize) -> Vec<Option<String>> {
    let nq = circuit.num_qubits();
    let mut cells: Vec<Option<String>> = vec![None; rows];

    match inst {
        Instruction::Gate { gate, qubits, condition } => {
            if gate.as_standard() == Some(StandardGate::CNOT) {
                cells[qubits[0]] = Some("■".to_string());
                cells[qubits[1]] = Some("⊕".to_string());
            } else {
                for &q in qubits {
                    cells[q] = Some(gate.name());
                }
            }

            let top = *qubits.iter().min().unwrap_or(&0);
            let bottom = *qubits.iter().max().unwrap_or(&0);
            connect(&mut cells, top, bottom, nq, false);

            if let Some(cond) = condition {
                let row = nq + cond.register;
                cells[row] = Some(format!("={}", cond.value));
                connect(&mut cells, bottom, row, nq, false);
            }
        }
        Instruction::Measure { qubit, clbit } => {
            let (row, local) = clbit_row(circuit, *clbit);
            cells[*qubit] = Some("M".to_string());
            cells[row] = Some(local.to_string());
            connect(&mut cells, *qubit, row, nq, true);
        }
        Instruction::Reset { qubit } => {
            cells[*qubit] = Some("|0>".to_string());
        }
        Instruction::Barrier { qubits } => {
            for &q in qubits {
                cells[q] = Some("░".to_string());
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::circuit::CircuitBuilder;
    use crate::quantum::gate::QuantumGate;

    #[test]
    fn test_center_pads_with_fill() {
        assert_eq!(center(Some("X"), 3, '─'), "─X─");
        assert_eq!(center(None, 4, '═'), "════");
        assert_eq!(center(Some("=1"), 5, '═'), "═=1══");
    }

    #[test]
    fn test_labels_are_right_aligned() {
        let mut qc = CircuitBuilder::new()
            .qreg("q", 1)
            .creg("long_name", 1)
            .build()
            .unwrap();
        qc.measure(0, 0).unwrap();

        let text = draw(&qc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("        q_0: "));
        assert!(lines[1].starts_with("long_name: 1/"));
        assert!(lines[0].contains('M'));
        assert!(lines[1].contains('0'));
    }

    #[test]
    fn test_cnot_drawn_as_control_and_target() {
        let mut qc = CircuitBuilder::new().qreg("q", 3).build().unwrap();
        qc.cx(2, 0).unwrap();

        let text = draw(&qc);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains('⊕'));
        assert!(lines[1].contains('┼'));
        assert!(lines[2].contains('■'));
        assert!(!text.contains("CNOT"));
    }

    /// Two-qubit gate that shares the CNOT name but is not the built-in one
    #[derive(Debug, Clone)]
    struct NamedLikeCnot;

    impl QuantumGate for NamedLikeCnot {
        fn qubit_count(&self) -> usize {
            2
        }

        fn matrix(&self) -> ndarray::Array2<num_complex::Complex64> {
            StandardGate::CNOT.matrix()
        }

        fn name(&self) -> String {
            "CNOT".to_string()
        }

        fn clone_box(&self) -> Box<dyn QuantumGate> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_custom_gate_drawn_by_name() {
        let mut qc = CircuitBuilder::new().qreg("q", 2).build().unwrap();
        qc.add_gate(Box::new(NamedLikeCnot), &[0, 1]).unwrap();

        let text = draw(&qc);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("CNOT"));
        assert!(lines[1].contains("CNOT"));
        assert!(!text.contains('■'));
        assert!(!text.contains('⊕'));
    }
}
