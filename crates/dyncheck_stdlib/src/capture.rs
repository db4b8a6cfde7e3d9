//! Scoped output capture.
//!
//! Payload code that "prints" its result (e.g. a variant that echoes three strings instead of returning
//! their concatenation) writes through [`echo`]. While an [`OutputBuffer`] is active on the current thread,
//! echoed text goes into it; [`OutputBuffer::finish`] hands the text back as the payload's effective result.
//!
//! Buffers nest and are thread-local. Dropping a buffer without finishing it (early return, `?`, panic)
//! releases it, so a faulting payload never leaks a buffer into the next case or variant.
//!
//! ## Examples
//! ```rust
//! use dyncheck_stdlib::capture::{OutputBuffer, echo};
//!
//! let buf = OutputBuffer::start();
//! echo("foo");
//! echo("bar");
//! assert_eq!(buf.finish(), "foobar");
//! ```

use std::cell::RefCell;
use std::io::Write as _;
use std::marker::PhantomData;

use dyncheck_core::PayloadFault;

thread_local! {
    static BUFFERS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// An active capture scope. Not `Send`: it belongs to the thread that started it.
#[derive(Debug)]
#[must_use = "dropping the buffer immediately discards the captured output"]
pub struct OutputBuffer {
    depth: usize,
    released: bool,
    _thread_bound: PhantomData<*const ()>,
}

impl OutputBuffer {
    /// Acquire a new (innermost) capture buffer.
    pub fn start() -> Self {
        let depth = BUFFERS.with(|b| {
            let mut b = b.borrow_mut();
            b.push(String::new());
            b.len()
        });
        Self {
            depth,
            released: false,
            _thread_bound: PhantomData,
        }
    }

    /// Release the buffer and return everything echoed into it.
    pub fn finish(mut self) -> String {
        self.released = true;
        release(self.depth)
    }

    /// Text captured so far, without releasing.
    pub fn contents(&self) -> String {
        BUFFERS.with(|b| b.borrow().get(self.depth - 1).cloned().unwrap_or_default())
    }
}

impl Drop for OutputBuffer {
    fn drop(&mut self) {
        if !self.released {
            release(self.depth);
        }
    }
}

// Releasing a buffer also releases any inner buffers that were leaked.
fn release(depth: usize) -> String {
    BUFFERS.with(|b| {
        let mut b = b.borrow_mut();
        let out = b.get_mut(depth - 1).map(std::mem::take).unwrap_or_default();
        b.truncate(depth - 1);
        out
    })
}

/// Write text to the innermost active buffer, or to stdout when no buffer is active.
pub fn echo(text: &str) {
    let captured = BUFFERS.with(|b| match b.borrow_mut().last_mut() {
        Some(buf) => {
            buf.push_str(text);
            true
        }
        None => false,
    });
    if !captured {
        let mut out = std::io::stdout().lock();
        // A closed stdout must not fault the payload.
        let _ = out.write_all(text.as_bytes());
    }
}

/// Number of active buffers on this thread.
pub fn active_depth() -> usize {
    BUFFERS.with(|b| b.borrow().len())
}

/// Run `body` inside a fresh buffer and return what it echoed.
///
/// ## Returns
/// - `Ok(text)` when `body` succeeds.
/// - `Err(fault)` when `body` faults; the buffer is released either way.
pub fn capture<F>(body: F) -> Result<String, PayloadFault>
where
    F: FnOnce() -> Result<(), PayloadFault>,
{
    let buf = OutputBuffer::start();
    body()?;
    Ok(buf.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_buffers_are_independent() {
        let outer = OutputBuffer::start();
        echo("a");
        let inner = OutputBuffer::start();
        echo("b");
        assert_eq!(inner.finish(), "b");
        echo("c");
        assert_eq!(outer.finish(), "ac");
        assert_eq!(active_depth(), 0);
    }

    #[test]
    fn faulting_body_releases_buffer() {
        let res = capture(|| {
            echo("partial");
            Err(PayloadFault::value_error("stop"))
        });
        assert_eq!(res, Err(PayloadFault::value_error("stop")));
        assert_eq!(active_depth(), 0);
    }

    #[test]
    fn panicking_body_releases_buffer() {
        let res = std::panic::catch_unwind(|| {
            let _buf = OutputBuffer::start();
            echo("x");
            panic!("boom");
        });
        assert!(res.is_err());
        assert_eq!(active_depth(), 0);
    }

    #[test]
    fn leaked_inner_buffer_is_released_with_outer() {
        let outer = OutputBuffer::start();
        std::mem::forget(OutputBuffer::start());
        echo("lost");
        assert_eq!(outer.finish(), "");
        assert_eq!(active_depth(), 0);
    }

    #[test]
    fn capture_returns_echoed_text() {
        let out = capture(|| {
            echo("foo");
            echo("bar");
            Ok(())
        });
        assert_eq!(out.as_deref(), Ok("foobar"));
    }

    #[test]
    fn contents_peeks_without_release() {
        let buf = OutputBuffer::start();
        echo("x");
        assert_eq!(buf.contents(), "x");
        assert_eq!(active_depth(), 1);
        drop(buf);
        assert_eq!(active_depth(), 0);
    }
}
