//! Layout and paint pass
//!
//! One recursive walk positions and draws nodes, records the extent of each
//! selectable node, and measures the document. After the first complete
//! pass, nodes starting below the viewport are skipped, so the document
//! height is only known as a high-water mark.

use alloc::vec::Vec;

use mouseless_display::{
    DisplayError, PixelDisplay, Rgb565, TextStyle, ACCENT_COLOR, BACKGROUND_COLOR, TEXT_COLOR,
};

use crate::config::RendererConfig;
use crate::document::{Document, NodeId, NodeKind};
use crate::scroll::ScrollState;
use crate::selection::SelectableEntry;

/// Space above every laid-out node
pub const NODE_GAP: usize = 4;
/// Left margin for body text
pub const TEXT_X: i32 = 2;
/// Line advance for size-2 text (16px glyphs + 2px padding)
pub const TEXT_LINE_HEIGHT: usize = 18;
/// Line advance for headings (24px glyphs + 2px padding)
pub const HEADING_LINE_HEIGHT: usize = 26;

const TEXT_SIZE: u8 = 2;
const HEADING_SIZE: u8 = 3;

// Button box metrics
const BUTTON_PADDING: usize = 5;
const BUTTON_TEXT_X: i32 = 7;
const BUTTON_MARGIN: usize = 2;

/// Paint the scrollable body of `doc`
///
/// Reconciles the scroll state first, then lays out every top-level node.
/// `entries` must be the index rebuilt from `doc`.
pub fn paint_body<D: PixelDisplay>(
    display: &mut D,
    doc: &Document,
    scroll: &mut ScrollState,
    entries: &mut [SelectableEntry],
    config: &RendererConfig,
) -> Result<(), DisplayError> {
    scroll.begin_frame();

    let selected = scroll.selected_node(entries);
    let mut pass = Pass {
        display,
        doc,
        entries,
        selected,
        status_bar_height: config.status_bar_height as usize,
        scroll_height: scroll.scroll_height(),
        skip_below: scroll.has_rendered().then(|| scroll.viewport_bottom()),
        position: 0,
        index: 0,
    };
    for &node in doc.top_level() {
        pass.render_node(node)?;
    }

    let end = pass.position;
    scroll.finish_layout(end);
    Ok(())
}

/// Paint the fixed status bar across the configured viewport width
pub fn draw_status_bar<D: PixelDisplay>(
    display: &mut D,
    title: &str,
    config: &RendererConfig,
) -> Result<(), DisplayError> {
    display.fill_rect(
        0,
        0,
        config.viewport_width,
        config.status_bar_height,
        ACCENT_COLOR,
    )?;
    display.draw_text(
        2,
        2,
        title,
        TextStyle::new(TEXT_COLOR, ACCENT_COLOR, TEXT_SIZE),
    )
}

struct Pass<'a, D> {
    display: &'a mut D,
    doc: &'a Document,
    entries: &'a mut [SelectableEntry],
    selected: Option<NodeId>,
    status_bar_height: usize,
    scroll_height: usize,
    // Set once the document has been laid out completely
    skip_below: Option<usize>,
    position: usize,
    index: usize,
}

impl<D: PixelDisplay> Pass<'_, D> {
    fn render_node(&mut self, id: NodeId) -> Result<(), DisplayError> {
        if self.skip_below.is_some_and(|bottom| self.position > bottom) {
            return Ok(());
        }
        let doc = self.doc;
        let Some(node) = doc.get(id) else {
            return Ok(());
        };

        if node.kind.is_container() {
            if node.selectable {
                // Pre-order: the container's slot precedes its children's
                let slot = self.claim_entry();
                let top = self.position;
                self.render_children(id)?;
                self.mark_entry(slot, id, top);
            } else {
                self.render_children(id)?;
            }
            return Ok(());
        }

        let top = match node.kind {
            NodeKind::Text | NodeKind::Heading | NodeKind::Link | NodeKind::Button => {
                self.position += NODE_GAP;
                self.position
            }
            _ => self.position,
        };
        let highlighted = self.selected == Some(id);
        match node.kind {
            NodeKind::Text => self.render_lines(id, TEXT_COLOR, TEXT_SIZE, TEXT_LINE_HEIGHT)?,
            NodeKind::Heading => {
                self.render_lines(id, TEXT_COLOR, HEADING_SIZE, HEADING_LINE_HEIGHT)?
            }
            NodeKind::Link => {
                let (fg, bg) = if highlighted {
                    (TEXT_COLOR, ACCENT_COLOR)
                } else {
                    (ACCENT_COLOR, BACKGROUND_COLOR)
                };
                self.render_lines_with(id, TextStyle::new(fg, bg, TEXT_SIZE), TEXT_LINE_HEIGHT)?
            }
            NodeKind::Button => self.render_button(id, top, highlighted)?,
            _ => {}
        }

        if node.selectable {
            let slot = self.claim_entry();
            self.mark_entry(slot, id, top);
        }
        // Children of leaf kinds are consumed by their rule, not walked
        self.index += self.selectable_descendants(id);
        Ok(())
    }

    fn render_children(&mut self, id: NodeId) -> Result<(), DisplayError> {
        let doc = self.doc;
        for &child in doc.children(id) {
            self.render_node(child)?;
        }
        Ok(())
    }

    fn render_lines(
        &mut self,
        id: NodeId,
        fg: Rgb565,
        size: u8,
        line_height: usize,
    ) -> Result<(), DisplayError> {
        self.render_lines_with(id, TextStyle::new(fg, BACKGROUND_COLOR, size), line_height)
    }

    fn render_lines_with(
        &mut self,
        id: NodeId,
        style: TextStyle,
        line_height: usize,
    ) -> Result<(), DisplayError> {
        let doc = self.doc;
        for line in doc.text_lines(id) {
            let y = self.screen_y(self.position);
            self.position += line_height;
            self.display.draw_text(TEXT_X, y, line, style)?;
        }
        Ok(())
    }

    fn render_button(
        &mut self,
        id: NodeId,
        top: usize,
        highlighted: bool,
    ) -> Result<(), DisplayError> {
        let doc = self.doc;
        let lines = doc.text_lines(id);
        let style = TextStyle::new(TEXT_COLOR, BACKGROUND_COLOR, TEXT_SIZE);
        let glyph_width = style.glyph_width() as usize;
        let glyph_height = style.glyph_height() as usize;

        let max_chars = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let width = (max_chars * glyph_width + 2 * BUTTON_PADDING) as u16;
        let height = lines.len() * TEXT_LINE_HEIGHT + 8;
        let border = if highlighted { ACCENT_COLOR } else { TEXT_COLOR };

        let y = self.screen_y(top);
        self.display.draw_hline(TEXT_X, y, width, border)?;
        self.display
            .draw_hline(TEXT_X, y + height as i32, width, border)?;
        self.display.draw_vline(TEXT_X, y, height as u16, border)?;
        self.display
            .draw_vline(TEXT_X + width as i32, y, height as u16, border)?;

        self.position += BUTTON_PADDING;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.position += TEXT_LINE_HEIGHT - glyph_height;
            }
            let y = self.screen_y(self.position);
            self.display.draw_text(BUTTON_TEXT_X, y, line, style)?;
            self.position += glyph_height;
        }

        self.position = top + height + BUTTON_MARGIN;
        Ok(())
    }

    fn claim_entry(&mut self) -> usize {
        let slot = self.index;
        self.index += 1;
        slot
    }

    fn mark_entry(&mut self, slot: usize, id: NodeId, top: usize) {
        let bottom = self.position;
        debug_assert!(
            slot < self.entries.len(),
            "paint pass visited more selectable nodes than the index holds"
        );
        if let Some(entry) = self.entries.get_mut(slot) {
            debug_assert_eq!(entry.node, id, "paint order diverged from the index");
            entry.top = top;
            entry.bottom = bottom;
        }
    }

    fn selectable_descendants(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut pending: Vec<NodeId> = self.doc.children(id).to_vec();
        while let Some(child) = pending.pop() {
            if let Some(node) = self.doc.get(child) {
                count += usize::from(node.selectable);
                pending.extend(node.children.iter().copied());
            }
        }
        count
    }

    fn screen_y(&self, position: usize) -> i32 {
        (self.status_bar_height + position) as i32 - self.scroll_height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Command, Dispatcher};
    use crate::document::NodeSpec;
    use alloc::vec;
    use mouseless_display::{DrawOp, RecordingDisplay};

    fn config() -> RendererConfig {
        RendererConfig::default()
    }

    fn link(text: &str) -> NodeSpec {
        NodeSpec::new(NodeKind::Link)
            .with_attr("href", "/x.3ml")
            .with_child(NodeSpec::text([text]))
            .selectable()
    }

    fn button(lines: &[&str]) -> NodeSpec {
        NodeSpec::new(NodeKind::Button)
            .with_attr("onclick", "x()")
            .with_child(NodeSpec::text(lines.iter().copied()))
            .selectable()
    }

    fn body(children: Vec<NodeSpec>) -> Document {
        let mut root = NodeSpec::new(NodeKind::Body);
        root.children = children;
        Document::from_specs(vec![root])
    }

    fn paint(display: &mut RecordingDisplay, doc: &Document, dispatcher: &mut Dispatcher) {
        display.fill_screen(BACKGROUND_COLOR).unwrap();
        let (scroll, entries) = dispatcher.layout_parts();
        paint_body(display, doc, scroll, entries, &config()).unwrap();
    }

    fn loaded(doc: &Document) -> Dispatcher {
        let mut dispatcher = Dispatcher::new(&config());
        dispatcher.reset_for_load(doc);
        dispatcher
    }

    fn text_y(display: &RecordingDisplay, needle: &str) -> i32 {
        match display.find_text(needle) {
            Some(DrawOp::Text { y, .. }) => *y,
            _ => panic!("text {needle:?} not drawn"),
        }
    }

    fn text_style(display: &RecordingDisplay, needle: &str) -> TextStyle {
        match display.find_text(needle) {
            Some(DrawOp::Text { style, .. }) => *style,
            _ => panic!("text {needle:?} not drawn"),
        }
    }

    #[test]
    fn test_text_and_heading_positions() {
        let doc = body(vec![
            NodeSpec::new(NodeKind::Heading).with_child(NodeSpec::text(["Title"])),
            NodeSpec::text(["one", "two"]),
        ]);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);
        paint(&mut display, &doc, &mut dispatcher);

        assert_eq!(text_y(&display, "Title"), 20 + 4);
        assert_eq!(text_style(&display, "Title").size, 3);
        assert_eq!(text_y(&display, "one"), 20 + 4 + 26 + 4);
        assert_eq!(text_y(&display, "two"), 20 + 4 + 26 + 4 + 18);
        assert_eq!(dispatcher.scroll().total_height(), 4 + 26 + 4 + 36);
    }

    #[test]
    fn test_records_entry_extents() {
        let doc = body(vec![link("a"), button(&["press", "me"]), link("b")]);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);
        paint(&mut display, &doc, &mut dispatcher);

        let extents: Vec<(usize, usize)> = dispatcher
            .entries()
            .iter()
            .map(|entry| (entry.top, entry.bottom))
            .collect();
        // link: 4..22, button: 26..(26 + 2*18 + 8 + 2), link: 76..94
        assert_eq!(extents, [(4, 22), (26, 72), (76, 94)]);
    }

    #[test]
    fn test_button_box_and_text() {
        let doc = body(vec![button(&["ok", "cancel"])]);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);
        paint(&mut display, &doc, &mut dispatcher);

        let width = 6 * 12 + 10;
        assert!(display.ops().contains(&DrawOp::HLine {
            x: 2,
            y: 24,
            length: width,
            color: TEXT_COLOR,
        }));
        assert!(display.ops().contains(&DrawOp::VLine {
            x: 2 + width as i32,
            y: 24,
            length: 2 * 18 + 8,
            color: TEXT_COLOR,
        }));
        assert_eq!(text_y(&display, "ok"), 24 + 5);
        assert_eq!(text_y(&display, "cancel"), 24 + 5 + 16 + 2);
    }

    #[test]
    fn test_selection_highlight() {
        let doc = body(vec![link("first"), link("second"), button(&["go"])]);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);

        dispatcher.apply(Command::SelectNext, &doc);
        paint(&mut display, &doc, &mut dispatcher);
        assert_eq!(text_style(&display, "first").bg, ACCENT_COLOR);
        assert_eq!(text_style(&display, "second").fg, ACCENT_COLOR);

        dispatcher.apply(Command::SelectNext, &doc);
        dispatcher.apply(Command::SelectNext, &doc);
        paint(&mut display, &doc, &mut dispatcher);
        assert_eq!(text_style(&display, "first").bg, BACKGROUND_COLOR);
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::HLine { color, .. } if *color == ACCENT_COLOR)));
    }

    #[test]
    fn test_skips_offscreen_after_first_pass() {
        let children = (0..30).map(|i| NodeSpec::text([alloc::format!("line {i}")])).collect();
        let doc = body(children);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);

        paint(&mut display, &doc, &mut dispatcher);
        assert!(display.find_text("line 29").is_some());
        let total = dispatcher.scroll().total_height();
        assert_eq!(total, 30 * 22);

        paint(&mut display, &doc, &mut dispatcher);
        assert!(display.find_text("line 29").is_none());
        assert!(display.find_text("line 6").is_some());
        assert_eq!(dispatcher.scroll().total_height(), total);
    }

    #[test]
    fn test_head_is_not_drawn() {
        let doc = Document::from_specs(vec![
            NodeSpec::new(NodeKind::Head)
                .with_child(NodeSpec::new(NodeKind::Title).with_child(NodeSpec::text(["T"]))),
            NodeSpec::new(NodeKind::Body).with_child(NodeSpec::text(["body"])),
        ]);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);
        paint(&mut display, &doc, &mut dispatcher);

        assert!(display.find_text("T").is_none());
        assert_eq!(text_y(&display, "body"), 24);
    }

    #[test]
    fn test_selectable_child_of_leaf_keeps_index_aligned() {
        let odd_link = NodeSpec::new(NodeKind::Link)
            .with_child(NodeSpec::text(["odd"]).selectable())
            .selectable();
        let doc = body(vec![odd_link, link("after")]);
        let mut dispatcher = loaded(&doc);
        assert_eq!(dispatcher.entries().len(), 3);

        let mut display = RecordingDisplay::new(320, 170);
        paint(&mut display, &doc, &mut dispatcher);
        assert_eq!(dispatcher.entries()[2].top, 26);
    }

    #[test]
    fn test_selectable_container_spans_children() {
        let mut section = NodeSpec::new(NodeKind::Container).selectable();
        section.children = vec![link("inner"), NodeSpec::text(["note"])];
        let doc = body(vec![section, link("after")]);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);
        paint(&mut display, &doc, &mut dispatcher);

        let extents: Vec<(usize, usize)> = dispatcher
            .entries()
            .iter()
            .map(|entry| (entry.top, entry.bottom))
            .collect();
        assert_eq!(extents, [(0, 44), (4, 22), (48, 66)]);
    }

    #[test]
    fn test_scrolled_text_moves_up() {
        let children = (0..30).map(|i| NodeSpec::text([alloc::format!("row {i}")])).collect();
        let doc = body(children);
        let mut dispatcher = loaded(&doc);
        let mut display = RecordingDisplay::new(320, 170);
        paint(&mut display, &doc, &mut dispatcher);

        for _ in 0..3 {
            dispatcher.apply(Command::SelectNext, &doc);
        }
        assert_eq!(dispatcher.scroll().scroll_target(), 120);
        for _ in 0..40 {
            paint(&mut display, &doc, &mut dispatcher);
        }
        assert_eq!(dispatcher.scroll().scroll_height(), 120);
        assert_eq!(text_y(&display, "row 6"), 20 + 6 * 22 + 4 - 120);
    }

    #[test]
    fn test_status_bar() {
        let mut display = RecordingDisplay::new(320, 170);
        draw_status_bar(&mut display, "Home", &config()).unwrap();
        assert_eq!(
            display.ops()[0],
            DrawOp::FillRect {
                x: 0,
                y: 0,
                width: 320,
                height: 20,
                color: ACCENT_COLOR,
            }
        );
        assert_eq!(text_y(&display, "Home"), 2);
        assert_eq!(text_style(&display, "Home").bg, ACCENT_COLOR);
    }

    #[test]
    fn test_status_bar_follows_viewport_width() {
        let narrow = RendererConfig {
            viewport_width: 240,
            ..config()
        };
        let mut display = RecordingDisplay::new(320, 170);
        draw_status_bar(&mut display, "Home", &narrow).unwrap();
        assert!(matches!(
            display.ops()[0],
            DrawOp::FillRect { width: 240, height: 20, .. }
        ));
    }
}
