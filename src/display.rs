use std::io::{self, Write};

use crossterm::{cursor, queue, style::Print, terminal};

/// Destination for rendered frames.
pub trait FrameSink {
    fn present(&mut self, frame: &str) -> io::Result<()>;
}

/// Writes frames one after another. Used for bounded runs.
pub struct AppendSink<W: Write> {
    out: W,
}

impl<W: Write> AppendSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for AppendSink<W> {
    fn present(&mut self, frame: &str) -> io::Result<()> {
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

/// Homes the cursor and clears the screen before every frame, so the board
/// redraws in place.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn present(&mut self, frame: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All),
            Print(frame)
        )?;
        self.out.flush()
    }
}
