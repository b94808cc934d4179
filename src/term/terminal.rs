// termline — A multi-line readline engine for terminal command input
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crossterm::{QueueableCommand, cursor, style, terminal};
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

/// Output side of the terminal as seen by the editor.
///
/// The editor never talks to stdout directly; everything it draws goes
/// through this trait so hosts (and tests) can supply their own sink.
pub trait Terminal {
    /// Queue raw text, escape sequences included.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Start a batch of screen mutations that must appear at once.
    fn begin_atomic_update(&mut self) -> io::Result<()>;

    /// Finish the batch opened by `begin_atomic_update` and flush it.
    fn end_atomic_update(&mut self) -> io::Result<()>;

    fn clear_screen(&mut self) -> io::Result<()>;

    /// Audible/visual bell for actions that could not be performed.
    fn beep(&mut self) -> io::Result<()>;

    /// Current width of the screen in cells.
    fn screen_width(&mut self) -> io::Result<usize>;
}

/// Scoped atomic update: `end_atomic_update` runs on every exit path,
/// including early returns through `?`.
pub struct AtomicUpdate<'a, T: Terminal + ?Sized> {
    term: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> AtomicUpdate<'a, T> {
    pub fn begin(term: &'a mut T) -> io::Result<Self> {
        term.begin_atomic_update()?;
        Ok(Self { term })
    }
}

impl<T: Terminal + ?Sized> Deref for AtomicUpdate<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.term
    }
}

impl<T: Terminal + ?Sized> DerefMut for AtomicUpdate<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.term
    }
}

impl<T: Terminal + ?Sized> Drop for AtomicUpdate<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.term.end_atomic_update() {
            tracing::warn!("failed to end atomic update: {e}");
        }
    }
}

/// Terminal backed by crossterm, writing to any `Write` sink (normally stdout).
pub struct CrosstermTerminal<W: Write> {
    out: W,
}

impl CrosstermTerminal<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(style::Print(text))?;
        Ok(())
    }

    fn begin_atomic_update(&mut self) -> io::Result<()> {
        self.out.queue(terminal::BeginSynchronizedUpdate)?;
        Ok(())
    }

    fn end_atomic_update(&mut self) -> io::Result<()> {
        self.out.queue(terminal::EndSynchronizedUpdate)?;
        self.out.flush()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn beep(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }

    fn screen_width(&mut self) -> io::Result<usize> {
        terminal::size().map(|(width, _)| usize::from(width))
    }
}
