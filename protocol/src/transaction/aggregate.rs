//! Value aggregation over inputs and outputs.
//!
//! Both sums are lenient: a missing list is zero, an empty list is zero, and
//! an input whose referenced output was never resolved adds zero instead of
//! failing. This leniency is for balance display and fee estimation only.
//! Anything that needs every reference resolved must check that separately
//! (see [`super::verification::verify_transaction`]).

use super::output::{Input, Output};
use super::types::Amount;

/// Sum of the amounts of every resolved input.
pub fn sum_inputs(inputs: Option<&[Input]>) -> Amount {
    inputs
        .unwrap_or_default()
        .iter()
        .filter_map(Input::spent_output)
        .fold(Amount::zero(), |total, output| total + output.amount())
}

/// Sum of the amounts of every output.
pub fn sum_outputs(outputs: Option<&[Output]>) -> Amount {
    outputs
        .unwrap_or_default()
        .iter()
        .fold(Amount::zero(), |total, output| total + output.amount())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;

    fn output(amount: &str) -> Output {
        Output::new(1, "addr", amount.parse().unwrap(), Script::default())
    }

    #[test]
    fn missing_and_empty_are_zero() {
        assert!(sum_inputs(None).is_zero());
        assert!(sum_inputs(Some(&[])).is_zero());
        assert!(sum_outputs(None).is_zero());
        assert!(sum_outputs(Some(&[])).is_zero());
    }

    #[test]
    fn unresolved_input_contributes_nothing() {
        let inputs = vec![
            Input::unresolved(Script::default()),
            Input::new(output("5"), Script::default()),
        ];
        assert_eq!(sum_inputs(Some(inputs.as_slice())).to_string(), "5");
    }

    #[test]
    fn sums_are_exact() {
        let outputs = vec![output("0.1"), output("0.2"), output("1000000000000000000000")];
        assert_eq!(
            sum_outputs(Some(outputs.as_slice())).to_string(),
            "1000000000000000000000.3"
        );
    }
}
