use crate::command::{Command, CommandOutput, parse_number};
use crate::error::{Error, Result};

/// Raises a base to an exponent; shipped as a bundled plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerCommand;

impl Command for PowerCommand {
    fn execute(&self, args: &[String]) -> Result<CommandOutput> {
        let [base, exponent] = args else {
            return Err(Error::InvalidArgument(
                "Power command requires exactly 2 numeric arguments".into(),
            ));
        };

        let base = parse_number(base)?;
        let exponent = parse_number(exponent)?;
        Ok(CommandOutput::Number(base.powf(exponent)))
    }

    fn description(&self) -> &str {
        "Raise the first number to the power of the second number"
    }

    fn usage(&self) -> &str {
        "power <base> <exponent>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_power() {
        let out = PowerCommand.execute(&args(&["2", "10"])).unwrap();
        assert_eq!(out, CommandOutput::Number(1024.0));

        let out = PowerCommand.execute(&args(&["9", "0.5"])).unwrap();
        assert_eq!(out, CommandOutput::Number(3.0));
    }

    #[test]
    fn test_power_requires_exactly_two_arguments() {
        for input in [vec![], args(&["2"]), args(&["2", "3", "4"])] {
            let err = PowerCommand.execute(&input).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Power command requires exactly 2 numeric arguments"
            );
        }
    }

    #[test]
    fn test_power_rejects_non_numeric() {
        let err = PowerCommand.execute(&args(&["two", "3"])).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
