use calcrepl_core::{Operation, command::parse_number, format_number};
use tracing::{debug, info};

/// Evaluate `<a> <operation> <b>` and render the single line of output.
///
/// Failures are reported in the returned text; the process still exits 0.
pub fn oneshot_command(a: &str, b: &str, operation: &str) -> String {
    debug!("One-shot calculation: {} {} {}", a, operation, b);

    let (Ok(x), Ok(y)) = (parse_number(a), parse_number(b)) else {
        return format!("Invalid number input: {a} or {b} is not a valid number.");
    };

    let op = match operation.parse::<Operation>() {
        Ok(op) => op,
        Err(_) => return format!("Unknown operation: {operation}"),
    };

    match op.apply(x, y) {
        Ok(result) => format!(
            "The result of {a} {operation} {b} is equal to {}",
            format_number(result)
        ),
        Err(e) => {
            info!("One-shot calculation failed: {}", e);
            format!("An error occurred: {e}")
        }
    }
}
