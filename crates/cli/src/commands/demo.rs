use anyhow::Result;
use calcrepl_core::{Calculation, History, Operation, format_number, operations};
use std::io::{self, Write};

pub fn demo_command() -> Result<()> {
    let stdout = io::stdout();
    run_demo(&mut stdout.lock())?;
    Ok(())
}

/// Walk through the operations and the history API
pub fn run_demo(out: &mut impl Write) -> io::Result<()> {
    let (a, b) = (10.0, 5.0);
    let (fa, fb) = (format_number(a), format_number(b));

    writeln!(out, "Calculator Demo")?;
    writeln!(out, "--------------")?;
    writeln!(out, "Addition: {fa} + {fb} = {}", format_number(operations::add(a, b)))?;
    writeln!(
        out,
        "Subtraction: {fa} - {fb} = {}",
        format_number(operations::subtract(a, b))
    )?;
    writeln!(
        out,
        "Multiplication: {fa} × {fb} = {}",
        format_number(operations::multiply(a, b))
    )?;
    match operations::divide(a, b) {
        Ok(quotient) => writeln!(out, "Division: {fa} ÷ {fb} = {}", format_number(quotient))?,
        Err(e) => writeln!(out, "Division: {fa} ÷ {fb} failed: {e}")?,
    }

    let mut history = History::new();
    for op in Operation::ALL {
        history.push(Calculation::new(a, b, op.name()));
    }

    writeln!(out, "\nPerforming stored calculations:")?;
    for calc in history.iter() {
        match calc.perform() {
            Ok(result) => writeln!(
                out,
                "{} {} {} = {}",
                format_number(calc.a),
                calc.operation,
                format_number(calc.b),
                format_number(result)
            )?,
            Err(e) => writeln!(out, "{calc} failed: {e}")?,
        }
    }

    if let Some(latest) = history.latest() {
        writeln!(out, "\nLatest calculation: {latest}")?;
    }

    let adds = history.find_by_operation("add");
    writeln!(out, "\nFound {} addition operations in history", adds.len())?;

    if let Err(e) = operations::divide(10.0, 0.0) {
        writeln!(out, "\nHandled error: {e}")?;
    }

    Ok(())
}
