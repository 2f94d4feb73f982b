//! Minimal document tree standing in for the browser DOM.
//!
//! Pages bind to elements by id (`selector-jornada`, `leaderboard-table`, ...)
//! and by attribute (`data-i18n`), so the tree only needs lookup by those,
//! a class list, text/markup content and serialisation back to HTML.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::MisterError;

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Children(Vec<Element>),
    Text(String),
    /// Pre-rendered markup, as assigned through `innerHTML`.
    Html(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    content: Content,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            content: Content::Children(Vec::new()),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        for child in children {
            self.append_child(child);
        }
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Concatenated text of this subtree (raw markup is returned as-is).
    pub fn text(&self) -> String {
        match &self.content {
            Content::Text(t) => t.clone(),
            Content::Html(h) => h.clone(),
            Content::Children(children) => children.iter().map(Element::text).collect(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.content = Content::Html(html.into());
    }

    pub fn clear_children(&mut self) {
        self.content = Content::Children(Vec::new());
    }

    pub fn append_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    // <select> helpers

    pub fn options(&self) -> impl Iterator<Item = &Element> {
        self.children().iter().filter(|c| c.tag == "option")
    }

    /// Index of the option carrying `selected`, else the first option.
    pub fn selected_index(&self) -> Option<usize> {
        let mut count = 0;
        for (i, option) in self.options().enumerate() {
            if option.attr("selected").is_some() {
                return Some(i);
            }
            count += 1;
        }
        (count > 0).then_some(0)
    }

    pub fn set_selected_index(&mut self, index: usize) {
        if let Content::Children(children) = &mut self.content {
            for (i, option) in children.iter_mut().filter(|c| c.tag == "option").enumerate() {
                if i == index {
                    option.set_attr("selected", "selected");
                } else {
                    option.remove_attr("selected");
                }
            }
        }
    }

    /// Select by option value; returns false when no option has it.
    pub fn select_value(&mut self, value: &str) -> bool {
        let found = self.options().position(|o| o.attr("value") == Some(value));
        match found {
            Some(i) => {
                self.set_selected_index(i);
                true
            }
            None => false,
        }
    }

    pub fn value(&self) -> Option<String> {
        let index = self.selected_index()?;
        self.options()
            .nth(index)
            .and_then(|o| o.attr("value").map(str::to_string))
    }

    fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(pred))
    }

    fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        if let Content::Children(children) = &mut self.content {
            for child in children.iter_mut() {
                if let Some(found) = child.find_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// First descendant (or self) carrying `class`.
    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.find_mut(&|e: &Element| e.has_class(class))
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.has_class(class))
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        f(self);
        if let Content::Children(children) = &mut self.content {
            for child in children.iter_mut() {
                child.for_each_mut(f);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape_html(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
        }
        out.push('>');
        match &self.content {
            Content::Text(t) => out.push_str(&escape_html(t)),
            Content::Html(h) => out.push_str(h),
            Content::Children(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    body: Element,
}

impl Document {
    pub fn new(children: Vec<Element>) -> Self {
        let mut body = Element::new("body");
        for child in children {
            body.append_child(child);
        }
        Self { body }
    }

    pub fn element_by_id(&self, id: &str) -> Result<&Element, MisterError> {
        self.body
            .find(&|e: &Element| e.id.as_deref() == Some(id))
            .ok_or_else(|| MisterError::MissingElement(id.to_string()))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Result<&mut Element, MisterError> {
        self.body
            .find_mut(&|e: &Element| e.id.as_deref() == Some(id))
            .ok_or_else(|| MisterError::MissingElement(id.to_string()))
    }

    /// Visits every element carrying `attr`, in document order.
    pub fn for_each_with_attr_mut(&mut self, attr: &str, mut f: impl FnMut(&mut Element)) {
        self.body.for_each_mut(&mut |e: &mut Element| {
            if e.attr(attr).is_some() {
                f(e);
            }
        });
    }

    pub fn to_html(&self) -> String {
        self.body.to_html()
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
