use std::io::{self, Write};

/// One level of Python indentation.
pub const INDENT: &str = "    ";

/// A text sink that tracks the current nesting level.
///
/// Every `indent` must be matched by a later `revert_indent` before
/// `finish`. Unbalanced use is a bug in the emitter, not an input error, so
/// it panics instead of returning an error.
pub struct IndentWriter<W: Write> {
    sink: W,
    level: usize,
}

impl<W: Write> IndentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, level: 0 }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Indentation for the current level.
    pub fn current_indent(&self) -> String {
        INDENT.repeat(self.level)
    }

    /// Append text verbatim.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_all(text.as_bytes())
    }

    pub fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.newline()
    }

    /// Line break followed by the current indentation.
    pub fn newline(&mut self) -> io::Result<()> {
        self.write("\n")?;
        self.write_indent()
    }

    /// Indent the current line by one unit and nest one level deeper.
    pub fn indent(&mut self) -> io::Result<()> {
        self.write(INDENT)?;
        self.level += 1;
        Ok(())
    }

    /// Close one level with a blank separator line.
    pub fn revert_indent(&mut self) -> io::Result<()> {
        self.revert_indent_by(1)
    }

    /// Close `levels` levels with a blank separator line, then indent the
    /// next line at the outer level.
    pub fn revert_indent_by(&mut self, levels: usize) -> io::Result<()> {
        assert!(
            levels <= self.level,
            "revert_indent_by({levels}) at indentation level {}",
            self.level
        );
        self.write("\n\n")?;
        self.level -= levels;
        self.write_indent()
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        debug_assert_eq!(self.level, 0, "unbalanced indentation at end of output");
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn write_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.level {
            self.sink.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }
}
