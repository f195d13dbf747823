use super::{Command, CommandOutput, parse_numbers};
use crate::error::{Error, Result};
use crate::operations::Operation;

/// Arithmetic command reducing its arguments left to right
#[derive(Debug, Clone, Copy)]
pub struct ArithmeticCommand {
    operation: Operation,
}

impl ArithmeticCommand {
    pub fn new(operation: Operation) -> Self {
        Self { operation }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl Command for ArithmeticCommand {
    fn execute(&self, args: &[String]) -> Result<CommandOutput> {
        if args.len() < 2 {
            let name = match self.operation {
                Operation::Add => "Add",
                Operation::Subtract => "Subtract",
                Operation::Multiply => "Multiply",
                Operation::Divide => "Divide",
            };
            return Err(Error::InvalidArgument(format!(
                "{name} command requires at least 2 numeric arguments"
            )));
        }

        let operands = parse_numbers(args)?;
        self.operation.reduce(&operands).map(CommandOutput::Number)
    }

    fn description(&self) -> &str {
        match self.operation {
            Operation::Add => "Add two or more numbers together",
            Operation::Subtract => "Subtract numbers from the first number",
            Operation::Multiply => "Multiply two or more numbers together",
            Operation::Divide => "Divide the first number by the rest of the numbers",
        }
    }

    fn usage(&self) -> &str {
        match self.operation {
            Operation::Add => "add <number1> <number2> [number3 ...]",
            Operation::Subtract => "subtract <number1> <number2> [number3 ...]",
            Operation::Multiply => "multiply <number1> <number2> [number3 ...]",
            Operation::Divide => "divide <number1> <number2> [number3 ...]",
        }
    }
}

/// Signals the REPL to stop by returning `Flag(false)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _args: &[String]) -> Result<CommandOutput> {
        Ok(CommandOutput::Flag(false))
    }

    fn description(&self) -> &str {
        "Exit the calculator application"
    }

    fn usage(&self) -> &str {
        "exit"
    }
}
