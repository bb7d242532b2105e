//! Diagnostic trails attached to failures.
//!
//! A [`Trail`] is the ordered record of frames a failure passed through,
//! outermost first, with the frame that raised the failure last. Frames are
//! plain data (a function name and a source location), so a trail can never
//! keep the failure it describes, or anything the failing code closed over,
//! alive.

use core::fmt;
use std::collections::VecDeque;
use std::panic::Location;

/// A source location captured with `#[track_caller]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file path.
    pub file: &'static str,
    /// Line number (1-based).
    pub line: u32,
    /// Column number (1-based).
    pub column: u32,
}

impl SourceLocation {
    /// Converts a panic location into a source location.
    #[must_use]
    pub fn from_panic_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Returns the location of the caller.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_panic_location(Location::caller())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One entry of a diagnostic trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    function: Option<&'static str>,
    location: SourceLocation,
}

impl Frame {
    /// Creates a frame for a named function.
    #[must_use]
    pub const fn new(function: &'static str, location: SourceLocation) -> Self {
        Self {
            function: Some(function),
            location,
        }
    }

    /// Creates a frame whose function name is unknown.
    #[must_use]
    pub const fn unnamed(location: SourceLocation) -> Self {
        Self {
            function: None,
            location,
        }
    }

    /// Returns the function name, if known.
    #[must_use]
    pub const fn function(&self) -> Option<&'static str> {
        self.function
    }

    /// Returns where the frame was recorded.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}",
            self.function.unwrap_or("<unknown>"),
            self.location
        )
    }
}

/// Ordered frames of a failure, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail {
    frames: VecDeque<Frame>,
}

impl Trail {
    /// Creates an empty trail.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }

    /// Creates a trail holding only the raising frame.
    #[must_use]
    pub fn starting_at(frame: Frame) -> Self {
        let mut trail = Self::new();
        trail.frames.push_back(frame);
        trail
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true when no frame was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates frames from the outermost to the raising one.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &Frame> + '_ {
        self.frames.iter()
    }

    /// Function names in trail order; unknown names render as `<unknown>`.
    #[must_use]
    pub fn functions(&self) -> Vec<&'static str> {
        self.frames
            .iter()
            .map(|frame| frame.function.unwrap_or("<unknown>"))
            .collect()
    }

    /// Records that the failure unwound through `frame`.
    pub fn push_outer(&mut self, frame: Frame) {
        self.frames.push_front(frame);
    }

    /// Drops up to `n` leading frames and returns how many were removed.
    pub fn remove_leading(&mut self, n: usize) -> usize {
        let removed = n.min(self.frames.len());
        self.frames.drain(..removed);
        removed
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, frame) in self.frames.iter().enumerate() {
            if depth > 0 {
                writeln!(f)?;
            }
            write!(f, "  {depth}: {frame}")?;
        }
        Ok(())
    }
}

/// Expands to the name of the enclosing function.
///
/// Closures and async blocks report the function that contains them.
///
/// ```
/// fn load_manifest() -> &'static str {
///     outcome::function_name!()
/// }
/// assert_eq!(load_manifest(), "load_manifest");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let path = __type_name_of(__here);
        let path = path.strip_suffix("::__here").unwrap_or(path);
        let path = path.trim_end_matches("::{{closure}}");
        match path.rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }};
}
