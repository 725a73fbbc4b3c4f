//! Interactive lane view: selection, zoom, and inline rename.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use timeline_core::config::LayoutConfig;
use timeline_core::lanes::{lane_index_by_item, start_order};
use timeline_core::model::{ItemId, TimelineItem};
use timeline_core::palette::ColorBucket;
use timeline_core::view::{EditOutcome, EditState, ViewState};

use crate::gantt::Gantt;

/// Horizontal scroll step, in columns.
const SCROLL_STEP: usize = 8;

const HELP: &str = "←→ item  ↑↓ lane  +/- zoom  0 reset  </> scroll  Enter rename  q quit";
const EDIT_HELP: &str = "Enter save  Esc cancel  Tab save & next";

pub struct TimelineApp {
    view: ViewState,
    layout: LayoutConfig,
    selected: Option<ItemId>,
    scroll: usize,
    lane_scroll: usize,
    /// Scroll follows the selection until the user scrolls by hand.
    follow: bool,
    status: Option<String>,
    should_quit: bool,
}

impl TimelineApp {
    pub fn new(view: ViewState, layout: LayoutConfig) -> Self {
        let selected = chronological(view.items()).first().map(|item| item.id());
        Self {
            view,
            layout,
            selected,
            scroll: 0,
            lane_scroll: 0,
            follow: true,
            status: None,
            should_quit: false,
        }
    }

    #[cfg(test)]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn into_view(self) -> ViewState {
        self.view
    }

    #[cfg(test)]
    pub const fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    #[cfg(test)]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.view.edit().editing_id().is_some() {
            self.handle_edit_key(key);
        } else {
            self.handle_normal_key(key);
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let before = self.selected;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char('h') | KeyCode::Left => self.move_in_lane(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_in_lane(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_lane(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_lane(1),
            KeyCode::Tab => self.select_chronological(1),
            KeyCode::BackTab => self.select_chronological(-1),
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = chronological(self.view.items()).first().map(|item| item.id());
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = chronological(self.view.items()).last().map(|item| item.id());
            }

            KeyCode::Char('+' | '=') => {
                self.view.zoom_mut().zoom_in();
                self.announce_zoom();
            }
            KeyCode::Char('-') => {
                self.view.zoom_mut().zoom_out();
                self.announce_zoom();
            }
            KeyCode::Char('0') => {
                self.view.zoom_mut().reset();
                self.scroll = 0;
                self.announce_zoom();
            }

            KeyCode::Char('<' | 'H') => {
                self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
                self.follow = false;
            }
            KeyCode::Char('>' | 'L') => {
                self.scroll += SCROLL_STEP;
                self.follow = false;
            }

            KeyCode::Enter | KeyCode::Char('e') | KeyCode::F(2) => self.begin_edit(),
            _ => {}
        }
        if self.selected != before {
            self.follow = true;
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let result = match key.code {
            KeyCode::Enter => {
                self.commit();
                Ok(())
            }
            KeyCode::Esc => {
                self.view.cancel_edit();
                self.status = Some("Rename cancelled".to_string());
                Ok(())
            }
            KeyCode::Tab => {
                if let Some(outcome) = self.view.blur() {
                    self.report(&outcome);
                }
                if self.view.edit() == &EditState::Idle {
                    self.select_chronological(1);
                }
                Ok(())
            }
            KeyCode::Backspace => self.view.pop_draft_char(),
            KeyCode::Char(ch) => self.view.push_draft_char(ch),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.status = Some(err.to_string());
        }
    }

    fn begin_edit(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        match self.view.begin_edit(id) {
            Ok(()) => self.status = None,
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn commit(&mut self) {
        match self.view.commit_edit() {
            Ok(outcome) => self.report(&outcome),
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn report(&mut self, outcome: &EditOutcome) {
        self.status = Some(match outcome {
            EditOutcome::Renamed { id, new, .. } => format!("Renamed #{id} to {new}"),
            EditOutcome::Unchanged { id } => format!("#{id} unchanged"),
            EditOutcome::Rejected { .. } => "Name cannot be empty".to_string(),
        });
    }

    fn announce_zoom(&mut self) {
        self.follow = true;
        self.status = Some(format!("Zoom: {}%", self.view.zoom().percent()));
    }

    /// (lane, index within lane) of the selected item.
    fn position(&self) -> Option<(usize, usize)> {
        let id = self.selected?;
        let lanes = self.view.lanes();
        let lane = *lane_index_by_item(lanes).get(&id)?;
        let index = lanes[lane].iter().position(|item| item.id() == id)?;
        Some((lane, index))
    }

    fn move_in_lane(&mut self, delta: isize) {
        let Some((lane, index)) = self.position() else {
            return;
        };
        let items = self.view.lanes()[lane].items();
        if let Some(item) = index.checked_add_signed(delta).and_then(|i| items.get(i)) {
            self.selected = Some(item.id());
        }
    }

    /// Jump to the lane above or below, landing on the item whose start is
    /// closest to the current one.
    fn move_lane(&mut self, delta: isize) {
        let Some((lane, index)) = self.position() else {
            return;
        };
        let lanes = self.view.lanes();
        let anchor = lanes[lane].items()[index].start();
        let Some(target) = lane.checked_add_signed(delta).and_then(|l| lanes.get(l)) else {
            return;
        };
        self.selected = target
            .iter()
            .min_by_key(|item| (item.start() - anchor).num_days().abs())
            .map(|item| item.id());
    }

    fn select_chronological(&mut self, delta: isize) {
        let ordered = chronological(self.view.items());
        if ordered.is_empty() {
            return;
        }
        let current = self
            .selected
            .and_then(|id| ordered.iter().position(|item| item.id() == id))
            .unwrap_or(0);
        let next = current
            .checked_add_signed(delta)
            .map_or(ordered.len() - 1, |i| i % ordered.len());
        self.selected = Some(ordered[next].id());
    }

    /// Keep the selected bar and its lane inside the viewport.
    fn scroll_into_view(&mut self, gantt: &Gantt, width: usize, visible_lanes: usize) {
        if let Some(bar) = self.selected.and_then(|id| gantt.bar(id))
            && self.follow
        {
            if bar.start_col < self.scroll {
                self.scroll = bar.start_col;
            } else if bar.end_col() > self.scroll + width {
                self.scroll = bar.end_col().saturating_sub(width).min(bar.start_col);
            }
            if bar.lane < self.lane_scroll {
                self.lane_scroll = bar.lane;
            } else if visible_lanes > 0 && bar.lane >= self.lane_scroll + visible_lanes {
                self.lane_scroll = bar.lane + 1 - visible_lanes;
            }
        }
        self.scroll = self.scroll.min(gantt.columns.saturating_sub(width));
    }

    /// Render the view into `area` within the given frame.
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let [header, body, detail, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(self.header(), header);

        let block = Block::default().borders(Borders::ALL).title(" Lanes ");
        let inner = block.inner(body);
        frame.render_widget(block, body);

        let gantt = Gantt::build(
            self.view.lanes(),
            inner.width.max(1),
            self.view.zoom().level(),
            self.layout.min_width_percent,
        );
        let lane_height = self.layout.lane_height.max(1);
        let visible_lanes = usize::from(inner.height.saturating_sub(1) / lane_height);
        self.scroll_into_view(&gantt, usize::from(inner.width), visible_lanes);

        frame.render_widget(
            GanttWidget {
                gantt: &gantt,
                scroll: self.scroll,
                lane_scroll: self.lane_scroll,
                lane_height,
                selected: self.selected,
                editing: self.view.edit().editing_id(),
            },
            inner,
        );

        frame.render_widget(self.detail(), detail);
        frame.render_widget(self.footer(), footer);

        if let EditState::Editing { id, draft } = self.view.edit() {
            let popup = centered(area, 50, 3);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(format!("{draft}_")).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" Rename #{id} ")),
                ),
                popup,
            );
        }
    }

    fn header(&self) -> Paragraph<'static> {
        let summary = self.view.summary();
        let range = summary
            .span
            .map_or_else(|| "no items".to_string(), |s| format!("{} → {}", s.start, s.end));
        let zoom = self.view.zoom();
        let bound = if !zoom.can_zoom_in() {
            " (max)"
        } else if !zoom.can_zoom_out() {
            " (min)"
        } else {
            ""
        };

        Paragraph::new(vec![
            Line::from(Span::styled(
                "Timeline",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} items · {} lanes · {} days · {} · Zoom: {}%{}",
                summary.items,
                summary.lanes,
                summary.total_days,
                range,
                zoom.percent(),
                bound
            )),
        ])
    }

    /// Full name, dates, and length of the selected item; bars clip all three.
    fn detail(&self) -> Paragraph<'static> {
        let Some(item) = self.selected.and_then(|id| self.view.find(id)) else {
            return Paragraph::new("");
        };
        let days = item.duration_days();
        Paragraph::new(format!(
            "#{} {} · {} → {} · {} {}",
            item.id(),
            item.name(),
            item.start(),
            item.end(),
            days,
            if days == 1 { "day" } else { "days" }
        ))
    }

    fn footer(&self) -> Paragraph<'static> {
        let help = if self.view.edit() == &EditState::Idle {
            HELP
        } else {
            EDIT_HELP
        };
        let text = self
            .status
            .as_ref()
            .map_or_else(|| help.to_string(), |status| format!("{status}  ·  {help}"));
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
    }
}

fn chronological(items: &[TimelineItem]) -> Vec<&TimelineItem> {
    let mut ordered: Vec<&TimelineItem> = items.iter().collect();
    ordered.sort_by(|a, b| start_order(a, b));
    ordered
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let scaled = u32::from(area.width) * u32::from(percent_x) / 100;
    let width = u16::try_from(scaled)
        .unwrap_or(area.width)
        .max(10)
        .min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

const fn bucket_color(bucket: ColorBucket) -> Color {
    match bucket {
        ColorBucket::Blue => Color::Rgb(59, 130, 246),
        ColorBucket::Green => Color::Rgb(34, 197, 94),
        ColorBucket::Purple => Color::Rgb(168, 85, 247),
        ColorBucket::Orange => Color::Rgb(249, 115, 22),
        ColorBucket::Red => Color::Rgb(239, 68, 68),
        ColorBucket::Indigo => Color::Rgb(99, 102, 241),
        ColorBucket::Pink => Color::Rgb(236, 72, 153),
        ColorBucket::Teal => Color::Rgb(20, 184, 166),
    }
}

/// Draws the time scale on the first row and lanes below it.
struct GanttWidget<'a> {
    gantt: &'a Gantt,
    scroll: usize,
    lane_scroll: usize,
    lane_height: u16,
    selected: Option<ItemId>,
    editing: Option<ItemId>,
}

impl GanttWidget<'_> {
    fn put(&self, buf: &mut Buffer, area: Rect, col: usize, y: u16, ch: char, style: Style) {
        let Some(offset) = col.checked_sub(self.scroll) else {
            return;
        };
        let Ok(offset) = u16::try_from(offset) else {
            return;
        };
        if offset >= area.width {
            return;
        }
        if let Some(cell) = buf.cell_mut((area.x + offset, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

impl Widget for GanttWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let scale_style = Style::default().fg(Color::DarkGray);
        for tick in &self.gantt.ticks {
            for (offset, ch) in tick.label.chars().enumerate() {
                self.put(buf, area, tick.col + offset, area.y, ch, scale_style);
            }
        }

        let bar_rows = self.lane_height.saturating_sub(1).max(1);

        for bar in &self.gantt.bars {
            let Some(visible_lane) = bar.lane.checked_sub(self.lane_scroll) else {
                continue;
            };
            let Ok(visible_lane) = u16::try_from(visible_lane) else {
                continue;
            };
            let top = visible_lane
                .saturating_mul(self.lane_height)
                .saturating_add(1);
            if top >= area.height {
                continue;
            }

            let mut style = Style::default()
                .bg(bucket_color(bar.color))
                .fg(Color::Black);
            if self.selected == Some(bar.id) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            if self.editing == Some(bar.id) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            let label: Vec<char> = bar.label().chars().collect();
            for row in 0..bar_rows {
                let y = area.y.saturating_add(top).saturating_add(row);
                if y >= area.bottom() {
                    break;
                }
                for offset in 0..bar.len {
                    let ch = if row == 0 {
                        label.get(offset).copied().unwrap_or(' ')
                    } else {
                        ' '
                    };
                    self.put(buf, area, bar.start_col + offset, y, ch, style);
                }
            }
        }
    }
}
