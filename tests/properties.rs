use approx::assert_relative_eq;
use plotexpr::{evaluate, evaluate_with, Error, Expr, Function, Syntax, FUNCTIONS};
use test_case::test_case;

/// Finite values spread over many magnitudes, both signs
fn sample_points() -> Vec<f64> {
    let mut points = vec![0.0, -0.0, 1.0, -1.0, 0.5, 1e-300, -1e300, 123.456, -7.25];
    for i in -40_i32..=40 {
        points.push(f64::from(i) * 0.731);
    }
    points
}

#[test]
fn variable_is_identity() {
    for x in sample_points() {
        assert_eq!(evaluate("x", x).unwrap().to_bits(), x.to_bits());
    }
}

#[test]
fn square() {
    for x in sample_points() {
        let y = evaluate("x^2", x).unwrap();
        assert_relative_eq!(y, x * x, max_relative = 1e-15);
    }
}

#[test]
fn sine_matches_platform() {
    for x in sample_points() {
        assert!((evaluate("sin(x)", x).unwrap() - x.sin()).abs() <= 1e-9);
    }
}

#[test_case("2+3*4" => 14.0 ; "multiplication binds tighter than addition")]
#[test_case("2^3*4" => 32.0 ; "power binds tighter than multiplication")]
#[test_case("2 + 3" => 5.0 ; "whitespace")]
#[test_case("10-4-3" => 3.0 ; "subtraction is left associative")]
#[test_case("64/4/2" => 8.0 ; "division is left associative")]
#[test_case("2*3^2" => 18.0 ; "power on the right operand")]
#[test_case("exp(0) + cos(0)" => 2.0 ; "calls as operands")]
fn constant_formulas(formula: &str) -> f64 {
    let at_zero = evaluate(formula, 0.0).unwrap();
    assert_eq!(evaluate(formula, 42.0).unwrap(), at_zero);
    at_zero
}

#[test]
fn whitespace_insensitivity() {
    let pairs = [
        ("2 + 3", "2+3"),
        (" x ^ 2 * sin ( x ) ", "x^2*sin(x)"),
        ("\tlog(x)\n-\r1", "log(x)-1"),
    ];
    for &(spaced, packed) in &pairs {
        for x in sample_points() {
            assert_eq!(
                evaluate(spaced, x).map(f64::to_bits),
                evaluate(packed, x).map(f64::to_bits)
            );
        }
    }
}

#[test]
fn empty_input_fails() {
    for formula in &["", " ", "\t\n"] {
        let error = evaluate(formula, 1.0).unwrap_err();
        assert!(error.is_structural());
        assert!(matches!(error, Error::UnexpectedEnd { .. }));
    }
}

#[test]
fn undefined_operations_are_results() {
    assert_eq!(evaluate("log(x)", 0.0), Ok(std::f64::NEG_INFINITY));
    assert!(evaluate("log(x)", -1.0).unwrap().is_nan());
    assert_eq!(evaluate("1 / x", 0.0), Ok(std::f64::INFINITY));
    assert_eq!(evaluate("-1 / x", 0.0), Ok(std::f64::NEG_INFINITY));
    assert!(evaluate("x / x", 0.0).unwrap().is_nan());
    assert_eq!(evaluate("exp(x)", 1000.0), Ok(std::f64::INFINITY));
}

#[test]
fn idempotence() {
    let formulas = ["x^2 * sin(x)", "log(x) / x", "tan(x) - x", "1 / x"];
    for formula in &formulas {
        for x in sample_points() {
            let first = evaluate(formula, x).unwrap();
            let second = evaluate(formula, x).unwrap();
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}

#[test]
fn parsed_expressions_match_direct_evaluation() {
    let formulas = ["x^2 * sin(x) + 3", "cos(x) / x", "exp(x / 10) - log(x * x)"];
    for formula in &formulas {
        let expr = Expr::parse(formula).unwrap();
        for x in sample_points() {
            assert_eq!(
                expr.eval(x).to_bits(),
                evaluate(formula, x).unwrap().to_bits()
            );
        }
    }
}

#[test]
fn every_function_is_reachable() {
    assert_eq!(FUNCTIONS.len(), 5);
    for &function in &Function::ALL {
        let formula = format!("{}(x)", function.name());
        let y = evaluate(&formula, 0.5).unwrap();
        assert_eq!(y, function.apply(0.5), "{} should be reachable", formula);
    }
    assert_relative_eq!(evaluate("exp(1)", 0.0).unwrap(), std::f64::consts::E);
}

#[test]
fn bare_grouping() {
    assert!(evaluate("(x+1)*2", 1.0).unwrap_err().is_structural());
    assert!(evaluate("2*(x)", 1.0).unwrap_err().is_structural());
    let grouping = Syntax {
        grouping: true,
        ..Syntax::baseline()
    };
    assert_eq!(evaluate_with("(x+1)*2", 1.0, grouping), Ok(4.0));
    assert_eq!(evaluate_with("2*((x))", 1.0, grouping), Ok(2.0));
}

#[test]
fn unary_minus() {
    assert!(evaluate("-x", 1.0).is_err());
    assert!(evaluate("-sin(x)", 1.0).is_err());
    assert_eq!(evaluate("-2 * x", 3.0), Ok(-6.0));

    let negation = Syntax {
        negation: true,
        ..Syntax::baseline()
    };
    assert_eq!(evaluate_with("-x", 1.0, negation), Ok(-1.0));
    assert_eq!(evaluate_with("-sin(x)", 0.5, negation), Ok(-(0.5f64.sin())));
    assert_eq!(evaluate_with("-x^2", 3.0, negation), Ok(-9.0));
    assert_eq!(evaluate_with("-3^2", 0.0, negation), Ok(9.0));
}

#[test]
fn power_chains() {
    assert!(evaluate("2^3^2", 0.0).unwrap_err().is_structural());

    let chained = Syntax {
        chained_powers: true,
        ..Syntax::baseline()
    };
    assert_eq!(evaluate_with("2^3^2", 0.0, chained), Ok(512.0));
    assert_eq!(evaluate_with("2^3", 0.0, chained), Ok(8.0));
}

#[test]
fn extensions_keep_baseline_results() {
    let formulas = [
        "2 - -3",
        "-3^2",
        "x^-2",
        "x^2 * sin(x) - 1",
        "-0.5 * x / log(x)",
        "exp(x ^ 2) - -1",
    ];
    for formula in &formulas {
        for &x in &[0.3, 2.0, -1.5] {
            let baseline = evaluate(formula, x).unwrap();
            let extended = evaluate_with(formula, x, Syntax::extended()).unwrap();
            assert_eq!(baseline.to_bits(), extended.to_bits(), "{} at {}", formula, x);
        }
    }
}

#[test]
fn long_inputs_terminate() {
    let long = "x + ".repeat(200_000) + "1";
    assert_eq!(evaluate(&long, 1.0), Ok(200_001.0));
    let expr = Expr::parse(&long).unwrap();
    assert_eq!(expr.eval(2.0), 400_001.0);
    assert_eq!(evaluate_with(&long, 1.0, Syntax::extended()), Ok(200_001.0));

    let product = "x * ".repeat(200_000) + "1";
    assert_eq!(evaluate(&product, 1.0), Ok(1.0));
    assert_eq!(evaluate(&product, -1.0), Ok(1.0));

    let unclosed = "(".repeat(10_000);
    assert!(evaluate(&unclosed, 1.0).is_err());
    assert!(evaluate_with(&unclosed, 1.0, Syntax::extended()).is_err());

    let truncated = "sin(".repeat(100);
    assert!(matches!(
        evaluate(&truncated, 1.0),
        Err(Error::UnexpectedEnd { .. })
    ));
}

#[test]
fn concurrent_calls() {
    let handles: Vec<_> = (0_i32..8)
        .map(|i| {
            std::thread::spawn(move || {
                let x = f64::from(i);
                evaluate("x^2 + sin(x)", x).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let x = i as f64;
        assert_eq!(handle.join().unwrap(), x.powf(2.0) + x.sin());
    }
}
