//! SVG DOM rendering backend.
//!
//! Implements the RenderBackend trait by building SVG elements inside a host
//! element via web-sys. Charts go into a single `<svg>` that is replaced on
//! every redraw; log lines go into a `<pre class="lines">` next to it.

use std::fmt::Write as _;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node, SvgGraphicsElement, SvgTextContentElement};

use super::backend::{RenderBackend, TextNode};
use super::recorder::{CHAR_WIDTH, LINE_HEIGHT};
use crate::error::Result;
use crate::layout::{Rect, TextMetrics};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const OVERRIDES_ID: &str = "streamplot-overrides";
/// Chart label size, relative to the page font size
const TITLE_FONT_SIZE: &str = "1.1em";

pub struct SvgBackend {
    document: Document,
    host: Element,
    svg: Option<Element>,
    /// Open groups; the first entry is the translated plot group
    groups: Vec<Element>,
    log_view: Option<Element>,
}

impl SvgBackend {
    /// Render into `host`.
    pub fn new(host: Element) -> Result<Self> {
        let document = host
            .owner_document()
            .ok_or("Host element is not attached to a document")?;
        Ok(Self {
            document,
            host,
            svg: None,
            groups: Vec::new(),
            log_view: None,
        })
    }

    fn svg_element(&self, name: &str, class: &str) -> Result<Element> {
        let element = self.document.create_element_ns(Some(SVG_NS), name)?;
        if !class.is_empty() {
            element.set_attribute("class", class)?;
        }
        Ok(element)
    }

    fn parent(&self) -> Result<&Element> {
        self.groups
            .last()
            .ok_or_else(|| "No chart open; call begin_chart first".into())
    }

    fn append(&self, element: &Element) -> Result<()> {
        self.parent()?.append_child(element)?;
        Ok(())
    }

    fn log_view(&mut self) -> Result<Element> {
        if let Some(view) = &self.log_view {
            return Ok(view.clone());
        }
        let view = self.document.create_element("pre")?;
        view.set_attribute("class", "lines")?;
        self.host.append_child(&view)?;
        self.log_view = Some(view.clone());
        Ok(view)
    }

    fn measure_in_dom(&self, text: &str, class: &str) -> Result<TextMetrics> {
        let element = self.svg_element("text", class)?;
        element.set_text_content(Some(text));
        self.append(&element)?;

        let width = element
            .clone()
            .dyn_into::<SvgTextContentElement>()
            .map_err(|_| "Failed to cast to SVGTextContentElement")?
            .get_computed_text_length();
        let height = element
            .clone()
            .dyn_into::<SvgGraphicsElement>()
            .map_err(|_| "Failed to cast to SVGGraphicsElement")?
            .get_b_box()
            .height();
        element.remove();

        Ok(TextMetrics {
            width: f64::from(width),
            height: f64::from(height),
        })
    }
}

fn fmt_num(value: f64) -> String {
    format!("{value}")
}

impl RenderBackend for SvgBackend {
    fn clear_chart(&mut self) -> Result<()> {
        if let Some(svg) = self.svg.take() {
            svg.remove();
        }
        self.groups.clear();
        Ok(())
    }

    fn begin_chart(
        &mut self,
        outer_width: f64,
        outer_height: f64,
        origin: (f64, f64),
    ) -> Result<()> {
        self.clear_chart()?;
        let svg = self.svg_element("svg", "")?;
        svg.set_attribute("width", &fmt_num(outer_width))?;
        svg.set_attribute("height", &fmt_num(outer_height))?;
        let plot = self.svg_element("g", "")?;
        plot.set_attribute("transform", &format!("translate({},{})", origin.0, origin.1))?;
        svg.append_child(&plot)?;

        match &self.log_view {
            Some(view) => {
                let before: &Node = view;
                self.host.insert_before(&svg, Some(before))?;
            }
            None => {
                self.host.append_child(&svg)?;
            }
        }
        self.svg = Some(svg);
        self.groups.push(plot);
        Ok(())
    }

    fn begin_group(&mut self, class: &str) -> Result<()> {
        let group = self.svg_element("g", class)?;
        self.append(&group)?;
        self.groups.push(group);
        Ok(())
    }

    fn end_group(&mut self) -> Result<()> {
        if self.groups.len() <= 1 {
            return Err("end_group without an open group".into());
        }
        self.groups.pop();
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, class: &str) -> Result<()> {
        let element = self.svg_element("rect", class)?;
        element.set_attribute("x", &fmt_num(rect.x))?;
        element.set_attribute("y", &fmt_num(rect.y))?;
        element.set_attribute("width", &fmt_num(rect.width))?;
        element.set_attribute("height", &fmt_num(rect.height))?;
        self.append(&element)
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), class: &str) -> Result<()> {
        let element = self.svg_element("line", class)?;
        element.set_attribute("x1", &fmt_num(from.0))?;
        element.set_attribute("y1", &fmt_num(from.1))?;
        element.set_attribute("x2", &fmt_num(to.0))?;
        element.set_attribute("y2", &fmt_num(to.1))?;
        self.append(&element)
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)], class: &str) -> Result<()> {
        let mut path = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(path, "{command}{x},{y}");
        }
        let element = self.svg_element("path", class)?;
        element.set_attribute("d", &path)?;
        element.set_attribute("fill", "none")?;
        self.append(&element)
    }

    fn draw_circle(&mut self, center: (f64, f64), radius: f64, class: &str) -> Result<()> {
        let element = self.svg_element("circle", class)?;
        element.set_attribute("cx", &fmt_num(center.0))?;
        element.set_attribute("cy", &fmt_num(center.1))?;
        element.set_attribute("r", &fmt_num(radius))?;
        self.append(&element)
    }

    fn draw_text(&mut self, node: &TextNode<'_>) -> Result<()> {
        let element = self.svg_element("text", node.class)?;
        element.set_attribute("x", &fmt_num(node.x))?;
        element.set_attribute("y", &fmt_num(node.y))?;
        element.set_attribute("text-anchor", node.anchor.as_str())?;
        element.set_attribute("dominant-baseline", node.baseline.as_str())?;
        if node.rotate.abs() > f64::EPSILON {
            element.set_attribute(
                "transform",
                &format!("rotate({},{},{})", node.rotate, node.x, node.y),
            )?;
        }
        if node.emphasis {
            element.set_attribute("font-weight", "bold")?;
            element.set_attribute("font-size", TITLE_FONT_SIZE)?;
        }
        element.set_text_content(Some(node.text));
        self.append(&element)
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str, class: &str) -> TextMetrics {
        self.measure_in_dom(text, class).unwrap_or_else(|e| {
            log::debug!("text measurement fell back to estimate: {e}");
            TextMetrics {
                width: text.chars().count() as f64 * CHAR_WIDTH,
                height: LINE_HEIGHT,
            }
        })
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.document.set_title(title);
        Ok(())
    }

    fn set_style_overrides(&mut self, rules: &[String]) -> Result<()> {
        let style = match self.document.get_element_by_id(OVERRIDES_ID) {
            Some(style) => style,
            None => {
                let head = self.document.head().ok_or("Document has no head")?;
                let style = self.document.create_element("style")?;
                style.set_id(OVERRIDES_ID);
                head.append_child(&style)?;
                style
            }
        };
        style.set_text_content(Some(&rules.join("\n")));
        Ok(())
    }

    fn clear_log(&mut self) -> Result<()> {
        if let Some(view) = &self.log_view {
            view.set_text_content(None);
        }
        Ok(())
    }

    fn append_log_line(&mut self, timestamp: &str, line: &str) -> Result<()> {
        let view = self.log_view()?;
        let stamp = self.document.create_element("span")?;
        stamp.set_attribute("class", "timestamp")?;
        stamp.set_text_content(Some(&format!("[{timestamp}] ")));
        view.append_child(&stamp)?;
        let text = self.document.create_text_node(&format!("{line}\n"));
        view.append_child(&text)?;
        Ok(())
    }

    fn scroll_log_to_end(&mut self) -> Result<()> {
        if let Some(last) = self
            .log_view
            .as_ref()
            .and_then(Element::last_element_child)
        {
            last.scroll_into_view_with_bool(false);
        }
        Ok(())
    }
}
