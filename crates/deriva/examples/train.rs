//! Gradient-descent training of a tiny function approximator.
//!
//! A 1:N:1 network is built symbolically, differentiated with respect to
//! its input so the *derivative* is trained against samples of the target
//! function, and updated with simultaneous (atomic) gradient assignments.

use deriva::prelude::*;

const NEURONS: usize = 12;
const SAMPLES: usize = 24;
const STEPS: usize = 200;

fn activation(x: &Expression) -> Expression {
    x.sin()
}

fn training_set() -> Vec<(f64, f64)> {
    // y = sin(angle) sampled against x = cos(angle) over half a turn
    (0..=SAMPLES)
        .map(|sample| {
            let angle = sample as f64 * (std::f64::consts::PI / SAMPLES as f64);
            (angle.cos(), angle.sin())
        })
        .collect()
}

fn main() {
    let scope = Scope::new();
    let x = scope.var("x");
    let y = scope.var("y");
    let rate = scope.var("rate");

    let gain_0: Vec<Variable> = (0..NEURONS).map(|i| scope.var(&format!("g0_{i}"))).collect();
    let bias_0: Vec<Variable> = (0..NEURONS).map(|i| scope.var(&format!("b0_{i}"))).collect();
    let gain_1: Vec<Variable> = (0..NEURONS).map(|i| scope.var(&format!("g1_{i}"))).collect();
    let bias_1 = scope.var("b1");

    // deterministic spread of initial weights
    for (i, (g0, g1)) in gain_0.iter().zip(&gain_1).enumerate() {
        g0.set((i as f64).sin()).unwrap();
        g1.set((i as f64).cos()).unwrap();
    }

    // 1. the network: output = x*b1 + sum_i g1[i] * act(b0[i] + g0[i]*x)
    //    (x*b1 degenerates to plain b1 under differentiation by x)
    let mut output = &x * &bias_1;
    for i in 0..NEURONS {
        let neuron = activation(&(&bias_0[i] + &gain_0[i] * &x));
        output = output + &gain_1[i] * neuron;
    }

    // 2. train the differential of the network rather than the network
    let diff = output.derive(&x);

    // 3. squared distance from the differential to the target
    let loss = (&diff - &y) * (&diff - &y);

    // 4. average the loss over the whole training batch
    let mut batch = scope.constant(0.0);
    for &(sx, sy) in &training_set() {
        batch = batch + loss.bind(&x, sx).bind(&y, sy);
    }
    batch = batch / (SAMPLES + 1) as f64;

    // 5. instrument every weight with its gradient-descent update
    let mut gradients: Vec<(Variable, Expression)> = Vec::new();
    for v in gain_0.iter().chain(&bias_0).chain(&gain_1).chain([&bias_1]) {
        gradients.push((v.clone(), v - &rate * batch.derive(v)));
    }

    rate.set(0.05).unwrap();
    println!("initial loss: {:.6}", batch.evaluate());

    for step in 1..=STEPS {
        atomic_assign(&gradients).expect("gradient step produced a non-finite weight");
        if step % 50 == 0 {
            println!("step {step:4}: loss {:.6}", batch.evaluate());
        }
    }

    println!("final loss: {:.6}", batch.evaluate());
    batch.purge();
}
