//! Benchmarks for hamsynth circuit operations
//!
//! Run with: cargo bench -p hamsynth-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hamsynth_ir::{Circuit, QubitId};

/// A Trotter-like layer: Clifford frame, CNOT parity ladder, Rz, undo.
fn ladder_layer(circuit: &mut Circuit, n: u32, angle: f64) {
    for i in 0..n {
        circuit.h(QubitId(i)).unwrap();
    }
    for i in 0..n - 1 {
        circuit.cx(QubitId(i), QubitId(n - 1)).unwrap();
    }
    circuit.rz(angle, QubitId(n - 1)).unwrap();
    for i in (0..n - 1).rev() {
        circuit.cx(QubitId(i), QubitId(n - 1)).unwrap();
    }
    for i in 0..n {
        circuit.h(QubitId(i)).unwrap();
    }
}

fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("rz_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10);
        b.iter(|| {
            circuit
                .rz(black_box(0.125), black_box(QubitId(0)))
                .unwrap();
        });
    });

    group.bench_function("cx_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10);
        b.iter(|| {
            circuit
                .cx(black_box(QubitId(0)), black_box(QubitId(1)))
                .unwrap();
        });
    });

    group.finish();
}

fn bench_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("trotter_layers");

    for layers in &[10u32, 100, 500] {
        group.bench_with_input(BenchmarkId::new("build", layers), layers, |b, &l| {
            b.iter(|| {
                let mut circuit = Circuit::with_size("layers", 10);
                for k in 0..l {
                    ladder_layer(&mut circuit, 10, f64::from(k) * 1e-3);
                }
                black_box(circuit)
            });
        });
    }

    group.finish();
}

fn bench_circuit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_depth");

    for layers in &[10u32, 100, 500] {
        let mut circuit = Circuit::with_size("bench", 10);
        for k in 0..*layers {
            ladder_layer(&mut circuit, 10, f64::from(k) * 1e-3);
        }

        group.bench_with_input(BenchmarkId::new("depth", layers), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.depth()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gate_addition,
    bench_layers,
    bench_circuit_depth,
);

criterion_main!(benches);
