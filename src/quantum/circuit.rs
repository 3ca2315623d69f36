//! Quantum circuits over named registers
//!
//! A circuit owns quantum and classical registers laid out in declaration
//! order, plus an instruction list mixing unitary gates with measurement,
//! reset, barriers and classically conditioned gates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quantum::gate::{QuantumGate, StandardGate};

/// A named block of qubits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    pub name: String,
    pub size: usize,
}

impl QuantumRegister {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        QuantumRegister { name: name.into(), size }
    }
}

/// A named block of classical bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    pub name: String,
    pub size: usize,
}

impl ClassicalRegister {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        ClassicalRegister { name: name.into(), size }
    }
}

/// Gate guard on the integer value of a classical register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Index into the circuit's classical registers
    pub register: usize,
    pub value: u64,
}

/// One step of a circuit
#[derive(Debug, Clone)]
pub enum Instruction {
    Gate {
        gate: Box<dyn QuantumGate>,
        qubits: Vec<usize>,
        condition: Option<Condition>,
    },
    Measure {
        qubit: usize,
        clbit: usize,
    },
    Reset {
        qubit: usize,
    },
    Barrier {
        qubits: Vec<usize>,
    },
}

/// A quantum circuit with registers and a sequence of instructions
#[derive(Debug, Clone)]
pub struct QuantumCircuit {
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    instructions: Vec<Instruction>,
}

impl QuantumCircuit {
    /// Create an empty circuit from quantum and classical registers
    pub fn new(qregs: Vec<QuantumRegister>, cregs: Vec<ClassicalRegister>) -> Result<Self> {
        let mut seen: Vec<&str> = Vec::new();
        for name in qregs.iter().map(|r| &r.name).chain(cregs.iter().map(|r| &r.name)) {
            if seen.contains(&name.as_str()) {
                return Err(Error::DuplicateRegister { name: name.clone() });
            }
            seen.push(name);
        }

        Ok(QuantumCircuit {
            qregs,
            cregs,
            instructions: Vec::new(),
        })
    }

    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn num_qubits(&self) -> usize {
        self.qregs.iter().map(|r| r.size).sum()
    }

    pub fn num_clbits(&self) -> usize {
        self.cregs.iter().map(|r| r.size).sum()
    }

    /// Offset of the first qubit of each quantum register
    pub fn qreg_offsets(&self) -> Vec<usize> {
        offsets(self.qregs.iter().map(|r| r.size))
    }

    /// Offset of the first bit of each classical register
    pub fn creg_offsets(&self) -> Vec<usize> {
        offsets(self.cregs.iter().map(|r| r.size))
    }

    /// Global index of qubit `index` in register `register`
    pub fn qubit(&self, register: &str, index: usize) -> Result<usize> {
        let pos = self
            .qregs
            .iter()
            .position(|r| r.name == register)
            .ok_or_else(|| Error::UnknownRegister(register.to_string()))?;
        let reg = &self.qregs[pos];
        if index >= reg.size {
            return Err(Error::QubitOutOfRange { index, size: reg.size });
        }
        Ok(self.qreg_offsets()[pos] + index)
    }

    /// Global index of bit `index` in register `register`
    pub fn clbit(&self, register: &str, index: usize) -> Result<usize> {
        let pos = self.creg_index(register)?;
        let reg = &self.cregs[pos];
        if index >= reg.size {
            return Err(Error::ClbitOutOfRange { index, size: reg.size });
        }
        Ok(self.creg_offsets()[pos] + index)
    }

    /// All global qubit indices of a quantum register, in order
    pub fn qubits_of(&self, register: &str) -> Result<Vec<usize>> {
        let size = self
            .qregs
            .iter()
            .find(|r| r.name == register)
            .map(|r| r.size)
            .ok_or_else(|| Error::UnknownRegister(register.to_string()))?;
        (0..size).map(|i| self.qubit(register, i)).collect()
    }

    /// All global bit indices of a classical register, in order
    pub fn clbits_of(&self, register: &str) -> Result<Vec<usize>> {
        let pos = self.creg_index(register)?;
        (0..self.cregs[pos].size).map(|i| self.clbit(register, i)).collect()
    }

    fn creg_index(&self, register: &str) -> Result<usize> {
        self.cregs
            .iter()
            .position(|r| r.name == register)
            .ok_or_else(|| Error::UnknownRegister(register.to_string()))
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        let size = self.num_qubits();
        if qubit >= size {
            return Err(Error::QubitOutOfRange { index: qubit, size });
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: usize) -> Result<()> {
        let size = self.num_clbits();
        if clbit >= size {
            return Err(Error::ClbitOutOfRange { index: clbit, size });
        }
        Ok(())
    }

    /// Append a gate acting on global qubit indices
    pub fn add_gate(&mut self, gate: Box<dyn QuantumGate>, qubits: &[usize]) -> Result<()> {
        if gate.qubit_count() != qubits.len() {
            return Err(Error::ArityMismatch {
                gate: gate.name(),
                expected: gate.qubit_count(),
                actual: qubits.len(),
            });
        }

        for (k, &q) in qubits.iter().enumerate() {
            self.check_qubit(q)?;
            if qubits[..k].contains(&q) {
                return Err(Error::DuplicateQubit(q));
            }
        }

        self.instructions.push(Instruction::Gate {
            gate,
            qubits: qubits.to_vec(),
            condition: None,
        });
        Ok(())
    }

    /// Add an identity gate
    pub fn i(&mut self, qubit: usize) -> Result<()> {
        self.add_gate(Box::new(StandardGate::I), &[qubit])
    }

    /// Add a Pauli-X gate
    pub fn x(&mut self, qubit: usize) -> Result<()> {
        self.add_gate(Box::new(StandardGate::X), &[qubit])
    }

    /// Add a Pauli-Z gate
    pub fn z(&mut self, qubit: usize) -> Result<()> {
        self.add_gate(Box::new(StandardGate::Z), &[qubit])
    }

    /// Add a Hadamard gate
    pub fn h(&mut self, qubit: usize) -> Result<()> {
        self.add_gate(Box::new(StandardGate::H), &[qubit])
    }

    /// Add a CNOT gate
    pub fn cx(&mut self, control: usize, target: usize) -> Result<()> {
        self.add_gate(Box::new(StandardGate::CNOT), &[control, target])
    }

    /// Pairwise CNOTs `controls[k] -> targets[k]`, applied in order
    pub fn cx_many(&mut self, controls: &[usize], targets: &[usize]) -> Result<()> {
        if controls.len() != targets.len() {
            return Err(Error::ArityMismatch {
                gate: "CNOT".to_string(),
                expected: controls.len(),
                actual: targets.len(),
            });
        }
        for (&c, &t) in controls.iter().zip(targets) {
            self.cx(c, t)?;
        }
        Ok(())
    }

    /// Measure `qubit` into classical bit `clbit`
    pub fn measure(&mut self, qubit: usize, clbit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        self.check_clbit(clbit)?;
        self.instructions.push(Instruction::Measure { qubit, clbit });
        Ok(())
    }

    /// Measure a whole quantum register into a classical register, bit by bit
    pub fn measure_register(&mut self, qreg: &str, creg: &str) -> Result<()> {
        let qubits = self.qubits_of(qreg)?;
        let clbits = self.clbits_of(creg)?;
        if qubits.len() != clbits.len() {
            return Err(Error::DimensionMismatch {
                expected: qubits.len(),
                actual: clbits.len(),
            });
        }
        for (q, c) in qubits.into_iter().zip(clbits) {
            self.measure(q, c)?;
        }
        Ok(())
    }

    /// Return `qubit` to |0⟩ without recording an outcome
    pub fn reset(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        self.instructions.push(Instruction::Reset { qubit });
        Ok(())
    }

    /// Barrier across every qubit
    pub fn barrier(&mut self) {
        let qubits = (0..self.num_qubits()).collect();
        self.instructions.push(Instruction::Barrier { qubits });
    }

    /// Condition the most recently added gate on `register == value`
    pub fn c_if(&mut self, register: &str, value: u64) -> Result<()> {
        let pos = self.creg_index(register)?;
        let size = self.cregs[pos].size;
        if size < 64 && value >> size != 0 {
            return Err(Error::ConditionOutOfRange {
                register: register.to_string(),
                value,
                size,
            });
        }

        match self.instructions.last_mut() {
            Some(Instruction::Gate { condition, .. }) => {
                *condition = Some(Condition { register: pos, value });
                Ok(())
            }
            _ => Err(Error::NoGateToCondition),
        }
    }

    /// True when every instruction is an unconditioned gate or a barrier
    pub fn is_unitary(&self) -> bool {
        self.instructions.iter().all(|inst| match inst {
            Instruction::Gate { condition, .. } => condition.is_none(),
            Instruction::Barrier { .. } => true,
            _ => false,
        })
    }

    /// Integer value of classical register `register` (bit 0 least significant)
    pub fn register_value(&self, register: usize, bits: &[u8]) -> u64 {
        let offset = self.creg_offsets()[register];
        (0..self.cregs[register].size)
            .rev()
            .fold(0u64, |acc, k| (acc << 1) | u64::from(bits[offset + k]))
    }

    /// Format classical bits as a counts key: registers in reverse
    /// declaration order separated by spaces, highest bit first
    pub fn format_bits(&self, bits: &[u8]) -> String {
        let offsets = self.creg_offsets();
        self.cregs
            .iter()
            .zip(offsets)
            .rev()
            .map(|(reg, offset)| {
                (0..reg.size)
                    .rev()
                    .map(|k| if bits[offset + k] == 1 { '1' } else { '0' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn offsets(sizes: impl Iterator<Item = usize>) -> Vec<usize> {
    sizes
        .scan(0, |acc, size| {
            let start = *acc;
            *acc += size;
            Some(start)
        })
        .collect()
}

/// Builder for circuits over named registers
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
}

impl CircuitBuilder {
    /// Create a new circuit builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a quantum register
    pub fn qreg(mut self, name: impl Into<String>, size: usize) -> Self {
        self.qregs.push(QuantumRegister::new(name, size));
        self
    }

    /// Declare a classical register
    pub fn creg(mut self, name: impl Into<String>, size: usize) -> Self {
        self.cregs.push(ClassicalRegister::new(name, size));
        self
    }

    /// Build the empty quantum circuit
    pub fn build(self) -> Result<QuantumCircuit> {
        QuantumCircuit::new(self.qregs, self.cregs)
    }
}
