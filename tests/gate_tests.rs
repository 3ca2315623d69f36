use num_complex::Complex64;

use repcode::quantum::gate::constants;
use repcode::quantum::{QuantumGate, StandardGate, StateVector};
use repcode::Error;

/// Helper function for comparing complex numbers with tolerance
fn complex_approx_eq(a: Complex64, b: Complex64, epsilon: f64) -> bool {
    (a - b).norm() < epsilon
}

#[cfg(test)]
mod standard_gate_tests {
    use super::*;

    #[test]
    fn test_gate_arity_and_names() {
        assert_eq!(StandardGate::I.qubit_count(), 1);
        assert_eq!(StandardGate::X.qubit_count(), 1);
        assert_eq!(StandardGate::Z.qubit_count(), 1);
        assert_eq!(StandardGate::H.qubit_count(), 1);
        assert_eq!(StandardGate::CNOT.qubit_count(), 2);
        assert_eq!(StandardGate::CNOT.name(), "CNOT");
        assert_eq!(StandardGate::I.name(), "I");
    }

    #[test]
    fn test_boxed_gate_reports_standard_kind() {
        let gate: Box<dyn QuantumGate> = Box::new(StandardGate::CNOT);
        assert_eq!(gate.as_standard(), Some(StandardGate::CNOT));
        assert_eq!(gate.clone().as_standard(), Some(StandardGate::CNOT));
    }

    #[test]
    fn test_matrices_are_unitary() {
        for gate in [StandardGate::I, StandardGate::X, StandardGate::Z, StandardGate::H, StandardGate::CNOT] {
            let m = gate.matrix();
            let adjoint = m.t().mapv(|x| x.conj());
            let product = adjoint.dot(&m);
            for i in 0..m.shape()[0] {
                for j in 0..m.shape()[1] {
                    let expected = if i == j { Complex64::new(1.0, 0.0) } else { Complex64::new(0.0, 0.0) };
                    assert!(
                        complex_approx_eq(product[[i, j]], expected, 1e-10),
                        "{} is not unitary",
                        gate.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_hadamard_creates_superposition() {
        let state = StateVector::zero_state(1);
        let result = StandardGate::H.apply_to_qubits(&state, &[0]).unwrap();
        let amp = Complex64::new(constants::FRAC_1_SQRT_2, 0.0);
        assert!(complex_approx_eq(result.amplitudes()[0], amp, 1e-10));
        assert!(complex_approx_eq(result.amplitudes()[1], amp, 1e-10));
    }

    #[test]
    fn test_x_on_middle_qubit() {
        // |000⟩ -> |010⟩, qubit 0 is the most significant bit
        let state = StateVector::zero_state(3);
        let result = StandardGate::X.apply_to_qubits(&state, &[1]).unwrap();
        assert!((result.probability(0b010) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cnot_respects_control_order() {
        // |01⟩: qubit 1 set. CNOT(control=1, target=0) flips qubit 0
        let state = StateVector::computational_basis(2, 0b01).unwrap();
        let result = StandardGate::CNOT.apply_to_qubits(&state, &[1, 0]).unwrap();
        assert!((result.probability(0b11) - 1.0).abs() < 1e-10);

        // CNOT(control=0, target=1) leaves it alone
        let result = StandardGate::CNOT.apply_to_qubits(&state, &[0, 1]).unwrap();
        assert!((result.probability(0b01) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cnot_across_non_adjacent_qubits() {
        // control qubit 0, target qubit 2 in a 3-qubit register
        let state = StateVector::computational_basis(3, 0b100).unwrap();
        let result = StandardGate::CNOT.apply_to_qubits(&state, &[0, 2]).unwrap();
        assert!((result.probability(0b101) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_z_adds_phase_only_to_one() {
        let plus = StandardGate::H.apply_to_qubits(&StateVector::zero_state(1), &[0]).unwrap();
        let minus = StandardGate::Z.apply_to_qubits(&plus, &[0]).unwrap();
        assert!(minus.amplitudes()[0].re > 0.0);
        assert!(minus.amplitudes()[1].re < 0.0);
        assert!((minus.probability(0) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_apply_validation_errors() {
        let state = StateVector::zero_state(2);
        assert_eq!(
            StandardGate::CNOT.apply_to_qubits(&state, &[0]).unwrap_err(),
            Error::ArityMismatch { gate: "CNOT".to_string(), expected: 2, actual: 1 }
        );
        assert_eq!(
            StandardGate::X.apply_to_qubits(&state, &[2]).unwrap_err(),
            Error::QubitOutOfRange { index: 2, size: 2 }
        );
        assert_eq!(
            StandardGate::CNOT.apply_to_qubits(&state, &[1, 1]).unwrap_err(),
            Error::DuplicateQubit(1)
        );
    }
}
