//! Three ways to concatenate a short list of strings, and one unit that prints instead of returning.
//!
//! Every variant of a unit produces `"foobarbaz"` from the same fixture, so the units also pass result
//! verification under both equality modes.

use dyncheck_core::{PayloadFault, Value};
use dyncheck_stdlib::capture::{OutputBuffer, echo};
use dyncheck_stdlib::conversions::to_string;
use dyncheck_stdlib::strings;

use crate::runner::units::BenchmarkUnit;

fn fixture() -> Value {
    Value::list([Value::from("foo"), Value::from("bar"), Value::from("baz")])
}

fn part(fixture: &Value, index: usize) -> Result<String, PayloadFault> {
    let item = fixture
        .as_list()
        .and_then(|items| items.get(index))
        .ok_or_else(|| PayloadFault::index_error(format!("fixture has no element {index}")))?;
    to_string(item)
}

fn output_buffer(fixture: &Value) -> Result<Value, PayloadFault> {
    let buf = OutputBuffer::start();
    echo(&part(fixture, 0)?);
    echo(&part(fixture, 1)?);
    echo(&part(fixture, 2)?);
    Ok(Value::from(buf.finish()))
}

pub fn units() -> Vec<BenchmarkUnit> {
    vec![
        BenchmarkUnit::new("BenchmarkConcat")
            .with_fixture(fixture())
            .variant("benchmarkConcat3", |f| {
                Ok(Value::from(part(f, 0)? + &part(f, 1)? + &part(f, 2)?))
            })
            .variant("benchmarkImplode", |f| Ok(Value::from(strings::join(f, "")?)))
            .variant("benchmarkOutputBuffer", output_buffer),
        BenchmarkUnit::new("BenchmarkConcat3")
            .with_fixture(fixture())
            .variant("benchmarkConcat", output_buffer),
    ]
}
