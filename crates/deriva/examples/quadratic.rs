//! Quadratic formula explorer: build a polynomial symbolically, evaluate
//! its roots, and differentiate it repeatedly.

use deriva::prelude::*;

fn main() {
    let scope = Scope::new();
    let a = scope.var("a");
    let b = scope.var("b");
    let c = scope.var("c");
    let x = scope.var("x");

    let quadratic = &a * &x * &x + &b * &x + &c;
    let discriminant = &b * &b - 4 * &a * &c;
    let root0 = (-&b - discriminant.sqrt()) / (2 * &a);
    let root1 = (-&b + discriminant.sqrt()) / (2 * &a);

    println!("\n-------------- Quadratic formula:\n");
    println!("F(x,a,b,c) = {quadratic}");

    println!("\n-------------- Roots:\n");
    a.set(1.0).unwrap();
    b.set(-5.0).unwrap();
    c.set(4.0).unwrap();
    println!("Let a = {}, b = {} and c = {}", a.get(), b.get(), c.get());
    if discriminant.evaluate() < 0.0 {
        let re = (-&b / (2 * &a)).evaluate();
        let im = ((-discriminant.clone()).sqrt() / (2 * &a)).evaluate();
        println!("Complex root: {re} + {im}i");
        println!("Complex root: {re} - {im}i");
    } else {
        println!("{root0} = {}", root0.evaluate());
        println!("{root1} = {}", root1.evaluate());
    }

    println!("\n-------------- Evaluation:\n");
    for i in 0..8 {
        x.set(f64::from(i)).unwrap();
        println!("x = {i} ---> {quadratic} = {}", quadratic.evaluate());
    }

    println!("\n-------------- Derivative:\n");
    let derivative = quadratic.derive(&x);
    println!("F(x) = {quadratic} ---> F'(x) = {derivative}");

    println!("\n-------------- The derivative is an expression like any other:\n");
    let newton = &x - &quadratic / &derivative;
    println!("G(x) = x - F(x)/F'(x) = {newton}");
    println!("G'(x) = {}", newton.derive(&x));
    x.set(5.0).unwrap();
    println!("G'(5) = {}", newton.derive(&x).evaluate());

    println!("\n-------------- Expressions can be derived again and again:\n");
    println!("F(x) = {quadratic}");
    println!("F'(x) = {}", quadratic.derive(&x));
    println!("F''(x) = {}", quadratic.derive(&x).derive(&x));
    println!("F'''(x) = {}", quadratic.derive(&x).derive(&x).derive(&x));

    println!("\n-------------- ...with respect to any variable:\n");
    println!("F'(a) = {}", quadratic.derive(&a));
    println!("F'(b) = {}", quadratic.derive(&b));
    println!("F'(c) = {}", quadratic.derive(&c));

    println!("\n-------------- All elementary functions are supported:\n");
    let e = quadratic.derive(&x).sqrt().tanh().exp().sin().ln();
    println!("{e} --- derive(x) ---> {}", e.derive(&x));
}
