//! Month calendar in a titled border.

use time::{Date, Month, OffsetDateTime, Weekday};

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::core::text::Alignment;
use crate::error::RenderError;
use crate::widgets::border::Border;
use crate::widgets::cursor_at;
use crate::widgets::settings::{BorderSettings, FrameColors, TextSettings};

pub const CALENDAR_WIDTH: u16 = 41;
pub const CALENDAR_HEIGHT: u16 = 13;
const COLUMN_WIDTH: i64 = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarColors {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub header: Option<Color>,
    pub weekend: Option<Color>,
    pub today: Option<Color>,
}

#[derive(Debug, Clone)]
pub struct Calendar {
    pub geometry: Option<Rect>,
    pub year: i32,
    pub month: Month,
    pub first_day: Weekday,
    /// Highlight the current UTC date when it falls in this month.
    pub highlight_today: bool,
    /// Highlighted instead of today when `highlight_today` is off.
    pub highlighted_day: Option<Date>,
    pub settings: BorderSettings,
    pub colors: CalendarColors,
}

impl Calendar {
    pub fn new(year: i32, month: Month) -> Self {
        Self {
            geometry: None,
            year,
            month,
            first_day: Weekday::Sunday,
            highlight_today: false,
            highlighted_day: None,
            settings: BorderSettings::default(),
            colors: CalendarColors::default(),
        }
    }

    pub fn at(mut self, left: u16, top: u16) -> Self {
        self.geometry = Some(Rect::new(left, top, CALENDAR_WIDTH, CALENDAR_HEIGHT));
        self
    }

    pub fn starting_on(mut self, first_day: Weekday) -> Self {
        self.first_day = first_day;
        self
    }

    pub fn highlighting_today(mut self, highlight: bool) -> Self {
        self.highlight_today = highlight;
        self
    }

    pub fn highlighting(mut self, day: Date) -> Self {
        self.highlighted_day = Some(day);
        self
    }

    pub fn with_settings(mut self, settings: BorderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_colors(mut self, colors: CalendarColors) -> Self {
        self.colors = colors;
        self
    }

    /// `"<Month> <Year>"`.
    pub fn title(&self) -> String {
        format!("{} {}", self.month, self.year)
    }

    /// Display column of `day` once the week is rotated to start on `first_day`.
    pub fn column_of(&self, day: Weekday) -> i64 {
        let day = i64::from(day.number_days_from_sunday());
        let first = i64::from(self.first_day.number_days_from_sunday());
        (day - first).rem_euclid(7)
    }

    /// Every day of the month in order.
    pub fn days(&self) -> Result<Vec<Date>, RenderError> {
        let first = Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|err| RenderError::InvalidDate(err.to_string()))?;
        let mut days = vec![first];
        let mut current = first;
        while let Some(next) = current.next_day() {
            if next.month() != self.month {
                break;
            }
            days.push(next);
            current = next;
        }
        Ok(days)
    }

    fn geometry(&self, ctx: &RenderContext) -> Rect {
        self.geometry.unwrap_or(Rect::new(
            ctx.area.left,
            ctx.area.top,
            CALENDAR_WIDTH,
            CALENDAR_HEIGHT,
        ))
    }

    fn highlight(&self) -> Option<Date> {
        if self.highlight_today {
            Some(OffsetDateTime::now_utc().date())
        } else {
            self.highlighted_day
        }
    }
}

impl StaticWidget for Calendar {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let days = self.days()?;
        let geometry = self.geometry(ctx);
        let (left, top) = (i64::from(geometry.left), i64::from(geometry.top));

        let border = Border {
            geometry: Some(geometry),
            title: self.title(),
            settings: self.settings,
            text_settings: TextSettings::aligned(Alignment::Middle),
            colors: FrameColors {
                frame: self.colors.foreground.clone(),
                title: self.colors.foreground.clone(),
                text: self.colors.foreground.clone(),
                background: self.colors.background.clone(),
            },
            ..Border::default()
        };
        let mut out = border.render(ctx)?;

        let highlight = self.highlight();
        let mut y = top + 3;
        for date in &days {
            if date.day() > 1 && date.weekday() == self.first_day {
                y += 2;
            }
            let column = self.column_of(date.weekday());
            let x = left + 1 + COLUMN_WIDTH * column;
            let foreground = if Some(*date) == highlight {
                self.colors.today.as_ref()
            } else if matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
                self.colors.weekend.as_ref()
            } else {
                None
            }
            .or(self.colors.foreground.as_ref());
            out.push_str(&ctx.fg_or_default(foreground));
            out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));
            out.push_str(&cursor_at(x + 1, y + 1));
            out.push(' ');
            out.push_str(&date.day().to_string());
        }

        let mut weekday = self.first_day;
        for column in 0..7 {
            let name = weekday.to_string();
            out.push_str(&ctx.fg_or_default(self.colors.header.as_ref()));
            out.push_str(&ctx.bg_or_default(self.colors.background.as_ref()));
            out.push_str(&cursor_at(left + 1 + COLUMN_WIDTH * column + 2, top + 2));
            out.push_str(&ctx.layout.slice_columns(&name, 0, 3));
            weekday = weekday.next();
        }
        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let geometry = self.geometry(ctx);
        Some(Rect::new(
            geometry.left,
            geometry.top,
            geometry.width + 2,
            geometry.height + 2,
        ))
    }
}
