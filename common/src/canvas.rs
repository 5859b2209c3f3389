//! Drawing surface capability used by the widgets.
//!
//! Widgets never hold a display reference of their own: the run loop owns
//! one [`Canvas`] and passes it into every render call. [`DisplayCanvas`]
//! adapts any embedded-graphics `DrawTarget<Color = Rgb565>` (the simulator
//! window or a hardware driver) to this interface.
//!
//! The canvas keeps a current color and font, like the TFT libraries it
//! stands in for: `set_color`/`set_font` affect all following draw calls.
//! Drawing is infallible at this layer; driver errors are dropped.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::{BLACK, WHITE};
use crate::styles::{BIG_FONT, SMALL_FONT, TOP_LEFT};

/// Font selection for text draws.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Font {
    #[default]
    Small,
    Big,
}

impl Font {
    #[inline]
    pub const fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => SMALL_FONT,
            Self::Big => BIG_FONT,
        }
    }
}

/// Primitive 2D drawing surface.
pub trait Canvas {
    /// Color for subsequent lines and text.
    fn set_color(
        &mut self,
        color: Rgb565,
    );

    /// Font for subsequent text.
    fn set_font(
        &mut self,
        font: Font,
    );

    fn draw_line(
        &mut self,
        start: Point,
        end: Point,
    );

    /// Print a decimal integer with its top-left corner at `at`.
    fn print_number(
        &mut self,
        value: i32,
        at: Point,
    );

    /// Print text with its top-left corner at `at`.
    fn print_text(
        &mut self,
        text: &str,
        at: Point,
    );

    /// Fill the whole surface with the background color.
    fn clear(&mut self);
}

/// [`Canvas`] backed by an embedded-graphics draw target.
pub struct DisplayCanvas<D> {
    display: D,
    color: Rgb565,
    font: Font,
}

impl<D> DisplayCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target. Starts with WHITE and the small font.
    pub const fn new(display: D) -> Self {
        Self {
            display,
            color: WHITE,
            font: Font::Small,
        }
    }

    #[inline]
    pub const fn display(&self) -> &D { &self.display }

    #[inline]
    pub fn display_mut(&mut self) -> &mut D { &mut self.display }

    pub fn into_inner(self) -> D { self.display }

    #[inline]
    pub const fn color(&self) -> Rgb565 { self.color }

    #[inline]
    pub const fn font(&self) -> Font { self.font }
}

impl<D> Canvas for DisplayCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn set_color(
        &mut self,
        color: Rgb565,
    ) {
        self.color = color;
    }

    fn set_font(
        &mut self,
        font: Font,
    ) {
        self.font = font;
    }

    fn draw_line(
        &mut self,
        start: Point,
        end: Point,
    ) {
        Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(self.color, 1))
            .draw(&mut self.display)
            .ok();
    }

    fn print_number(
        &mut self,
        value: i32,
        at: Point,
    ) {
        // "-2147483648" is the longest i32
        let mut digits: String<12> = String::new();
        let _ = write!(digits, "{value}");
        self.print_text(&digits, at);
    }

    fn print_text(
        &mut self,
        text: &str,
        at: Point,
    ) {
        let style = MonoTextStyle::new(self.font.mono(), self.color);
        Text::with_text_style(text, at, style, TOP_LEFT)
            .draw(&mut self.display)
            .ok();
    }

    fn clear(&mut self) { self.display.clear(BLACK).ok(); }
}

// =============================================================================
// Recording Canvas (tests)
// =============================================================================

#[cfg(test)]
pub(crate) mod recording {
    use std::string::{String, ToString};
    use std::vec::Vec;

    use super::*;

    /// One call made on a [`RecordingCanvas`].
    #[derive(Clone, PartialEq, Eq, Debug)]
    pub enum Command {
        SetColor(Rgb565),
        SetFont(Font),
        Line(Point, Point),
        Number(i32, Point),
        Text(String, Point),
        Clear,
    }

    /// Canvas that records calls instead of drawing.
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub commands: Vec<Command>,
    }

    impl RecordingCanvas {
        pub fn new() -> Self { Self::default() }

        /// Lines with the color that was current when each was drawn.
        pub fn colored_lines(&self) -> Vec<(Rgb565, Point, Point)> {
            let mut color = WHITE;
            let mut lines = Vec::new();
            for command in &self.commands {
                match command {
                    Command::SetColor(c) => color = *c,
                    Command::Line(start, end) => lines.push((color, *start, *end)),
                    _ => {}
                }
            }
            lines
        }

        pub fn count(
            &self,
            pred: impl Fn(&Command) -> bool,
        ) -> usize {
            self.commands.iter().filter(|c| pred(c)).count()
        }
    }

    impl Canvas for RecordingCanvas {
        fn set_color(
            &mut self,
            color: Rgb565,
        ) {
            self.commands.push(Command::SetColor(color));
        }

        fn set_font(
            &mut self,
            font: Font,
        ) {
            self.commands.push(Command::SetFont(font));
        }

        fn draw_line(
            &mut self,
            start: Point,
            end: Point,
        ) {
            self.commands.push(Command::Line(start, end));
        }

        fn print_number(
            &mut self,
            value: i32,
            at: Point,
        ) {
            self.commands.push(Command::Number(value, at));
        }

        fn print_text(
            &mut self,
            text: &str,
            at: Point,
        ) {
            self.commands.push(Command::Text(text.to_string(), at));
        }

        fn clear(&mut self) { self.commands.push(Command::Clear); }
    }
}
