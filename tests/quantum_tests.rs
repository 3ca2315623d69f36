//quantum_tests.rs

#[cfg(test)]
mod tests {
    use ndarray::Array1;
    use num_complex::Complex64;

    use repcode::quantum::circuit::{CircuitBuilder, Instruction, QuantumCircuit};
    use repcode::quantum::StateVector;
    use repcode::Error;

    /// Circuit with a `q` register and, when `clbits > 0`, a `c` register
    fn circuit(qubits: usize, clbits: usize) -> QuantumCircuit {
        let builder = CircuitBuilder::new().qreg("q", qubits);
        let builder = if clbits > 0 { builder.creg("c", clbits) } else { builder };
        builder.build().unwrap()
    }

    /// Helper function for comparing complex numbers with tolerance
    fn complex_approx_eq(a: Complex64, b: Complex64, epsilon: f64) -> bool {
        (a - b).norm() < epsilon
    }

    #[test]
    fn test_state_vector_validation() {
        let amps = Array1::from(vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)]);
        assert_eq!(StateVector::new(1, amps).unwrap_err(), Error::NotNormalized);

        let amps = Array1::from(vec![Complex64::new(1.0, 0.0)]);
        assert_eq!(
            StateVector::new(1, amps).unwrap_err(),
            Error::DimensionMismatch { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_collapse_and_flip() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let amps = Array1::from(vec![
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(h, 0.0),
        ]);
        let mut bell = StateVector::new(2, amps).unwrap();
        assert!((bell.probability_of_one(0).unwrap() - 0.5).abs() < 1e-10);

        bell.collapse(0, 1).unwrap();
        assert!((bell.probability(0b11) - 1.0).abs() < 1e-10);

        bell.flip(1).unwrap();
        assert!((bell.probability(0b10) - 1.0).abs() < 1e-10);

        assert_eq!(
            bell.collapse(0, 0).unwrap_err(),
            Error::ZeroProbability { qubit: 0, outcome: 0 }
        );
    }

    #[test]
    fn test_tensor_and_inner_product() {
        let one = StateVector::computational_basis(1, 1).unwrap();
        let zero = StateVector::zero_state(1);
        let joined = one.tensor(&zero);
        assert_eq!(joined.qubit_count(), 2);
        assert!((joined.probability(0b10) - 1.0).abs() < 1e-10);

        let overlap = joined.inner_product(&joined).unwrap();
        assert!(complex_approx_eq(overlap, Complex64::new(1.0, 0.0), 1e-10));
        assert!(joined.inner_product(&zero).is_err());
    }

    #[test]
    fn test_state_display_lists_kets() {
        let state = StateVector::computational_basis(2, 0b10).unwrap();
        let text = state.to_string();
        assert!(text.contains("|10⟩"));
        assert!(text.contains("[100.0%]"));
    }

    #[test]
    fn test_circuit_records_instructions() {
        let mut qc = circuit(2, 2);
        qc.h(0).unwrap();
        qc.cx(0, 1).unwrap();
        qc.barrier();
        qc.measure(0, 0).unwrap();
        qc.reset(1).unwrap();

        assert_eq!(qc.instructions().len(), 5);
        assert!(matches!(qc.instructions()[2], Instruction::Barrier { ref qubits } if qubits == &vec![0, 1]));
        assert!(matches!(qc.instructions()[3], Instruction::Measure { qubit: 0, clbit: 0 }));
        assert!(!qc.is_unitary());
    }

    #[test]
    fn test_c_if_conditions_last_gate() {
        let mut qc = CircuitBuilder::new().qreg("q", 1).creg("c", 2).build().unwrap();
        qc.x(0).unwrap();
        qc.c_if("c", 3).unwrap();

        match &qc.instructions()[0] {
            Instruction::Gate { condition: Some(cond), .. } => {
                assert_eq!(cond.register, 0);
                assert_eq!(cond.value, 3);
            }
            other => panic!("expected conditioned gate, got {:?}", other),
        }

        assert_eq!(
            qc.c_if("c", 4).unwrap_err(),
            Error::ConditionOutOfRange { register: "c".to_string(), value: 4, size: 2 }
        );
    }

    #[test]
    fn test_c_if_requires_preceding_gate() {
        let mut qc = circuit(1, 1);
        assert_eq!(qc.c_if("c", 1).unwrap_err(), Error::NoGateToCondition);

        qc.measure(0, 0).unwrap();
        assert_eq!(qc.c_if("c", 1).unwrap_err(), Error::NoGateToCondition);
    }

    #[test]
    fn test_broadcast_validation() {
        let mut qc = circuit(3, 0);
        assert!(qc.cx_many(&[0, 1], &[2]).is_err());
        qc.cx_many(&[0, 1], &[2, 2]).unwrap();
        assert_eq!(qc.instructions().len(), 2);
        assert!(qc.is_unitary());

        assert_eq!(qc.measure(0, 0).unwrap_err(), Error::ClbitOutOfRange { index: 0, size: 0 });
    }

    #[test]
    fn test_measure_register_pairs_bits() {
        let mut qc = CircuitBuilder::new()
            .qreg("data", 2)
            .qreg("anc", 1)
            .creg("out", 2)
            .build()
            .unwrap();
        qc.measure_register("data", "out").unwrap();

        assert!(matches!(qc.instructions()[0], Instruction::Measure { qubit: 0, clbit: 0 }));
        assert!(matches!(qc.instructions()[1], Instruction::Measure { qubit: 1, clbit: 1 }));
        assert!(qc.measure_register("anc", "out").is_err());
    }
}
