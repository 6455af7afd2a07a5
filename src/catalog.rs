//! Shape catalog: the fixed library of shape templates.
//!
//! Each template is an SVG tag plus an ordered set of default attributes.
//! New document shapes are deep copies of these templates.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// How an attribute's default was declared.
///
/// The kind is fixed at catalog construction and survives arbitrary user
/// edits: overwriting a numeric attribute with non-numeric text changes the
/// stored value, never the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrKind {
    Number,
    Text,
}

/// A single attribute value: a kind tag plus the raw text that will be
/// interpolated into markup verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrValue {
    pub kind: AttrKind,
    pub value: String,
}

impl AttrValue {
    pub fn number(n: i64) -> Self {
        Self {
            kind: AttrKind::Number,
            value: n.to_string(),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self {
            kind: AttrKind::Text,
            value: s.into(),
        }
    }
}

/// Insertion-ordered attribute map with checked mutation.
///
/// `set` only overwrites attributes that already exist, so a typo'd
/// attribute name is a reportable condition instead of a silent new entry.
/// `insert` (add-or-replace) is reserved for building templates and
/// display-only decoration copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attribute, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: AttrValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Overwrite the raw value of an existing attribute. Returns false if no
    /// attribute with that name exists; the kind tag is left untouched.
    pub fn set(&mut self, name: &str, raw: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                v.value = raw.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterate attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An immutable shape template: tag name plus default attributes.
#[derive(Debug, Clone)]
pub struct ShapeTemplate {
    pub tag: &'static str,
    pub attrs: AttrMap,
}

impl ShapeTemplate {
    fn new(tag: &'static str, attrs: &[(&str, AttrValue)]) -> Self {
        let mut map = AttrMap::new();
        for (name, value) in attrs {
            map.insert(*name, value.clone());
        }
        Self { tag, attrs: map }
    }
}

/// The catalog: one template per supported shape kind, in menu order.
pub fn catalog() -> &'static [ShapeTemplate] {
    static CATALOG: OnceLock<Vec<ShapeTemplate>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            ShapeTemplate::new(
                "circle",
                &[
                    ("cx", AttrValue::number(25)),
                    ("cy", AttrValue::number(25)),
                    ("r", AttrValue::number(25)),
                ],
            ),
            ShapeTemplate::new(
                "ellipse",
                &[
                    ("cx", AttrValue::number(50)),
                    ("cy", AttrValue::number(25)),
                    ("rx", AttrValue::number(50)),
                    ("ry", AttrValue::number(25)),
                ],
            ),
            ShapeTemplate::new(
                "line",
                &[
                    ("x1", AttrValue::number(0)),
                    ("y1", AttrValue::number(0)),
                    ("x2", AttrValue::number(25)),
                    ("y2", AttrValue::number(25)),
                    ("stroke", AttrValue::text("black")),
                    ("stroke-width", AttrValue::number(3)),
                ],
            ),
            ShapeTemplate::new(
                "path",
                &[(
                    "d",
                    AttrValue::text(
                        "M 10,30 A 20,20 0,0,1 50,30 A 20,20 0,0,1 90,30 Q 90,60 50,90 Q 10,60 10,30 z",
                    ),
                )],
            ),
            ShapeTemplate::new(
                "polygon",
                &[("points", AttrValue::text("0,100 50,25 50,75 100,0"))],
            ),
            ShapeTemplate::new(
                "polyline",
                &[
                    ("points", AttrValue::text("0,100 50,25 50,75 100,0")),
                    ("fill", AttrValue::text("none")),
                    ("stroke", AttrValue::text("black")),
                    ("stroke-width", AttrValue::number(3)),
                ],
            ),
            ShapeTemplate::new(
                "rect",
                &[
                    ("x", AttrValue::number(0)),
                    ("y", AttrValue::number(0)),
                    ("width", AttrValue::number(100)),
                    ("height", AttrValue::number(50)),
                    ("rx", AttrValue::number(10)),
                    ("ry", AttrValue::number(10)),
                ],
            ),
        ]
    })
}

/// Look up a template by tag.
pub fn template(tag: &str) -> Option<&'static ShapeTemplate> {
    catalog().iter().find(|t| t.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_supported_tags() {
        let tags: Vec<&str> = catalog().iter().map(|t| t.tag).collect();
        assert_eq!(
            tags,
            ["circle", "ellipse", "line", "path", "polygon", "polyline", "rect"]
        );
    }

    #[test]
    fn circle_defaults() {
        let t = template("circle").unwrap();
        assert_eq!(t.attrs.get("cx").unwrap().value, "25");
        assert_eq!(t.attrs.get("cy").unwrap().value, "25");
        assert_eq!(t.attrs.get("r").unwrap().value, "25");
        assert_eq!(t.attrs.get("r").unwrap().kind, AttrKind::Number);
    }

    #[test]
    fn rect_defaults_in_declaration_order() {
        let t = template("rect").unwrap();
        let names: Vec<&str> = t.attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["x", "y", "width", "height", "rx", "ry"]);
        assert_eq!(t.attrs.get("width").unwrap().value, "100");
        assert_eq!(t.attrs.get("height").unwrap().value, "50");
    }

    #[test]
    fn unknown_tag_has_no_template() {
        assert!(template("triangle").is_none());
    }

    #[test]
    fn set_rejects_unknown_name() {
        let mut attrs = template("circle").unwrap().attrs.clone();
        assert!(!attrs.set("href", "x"));
        assert_eq!(attrs.len(), 3);
        assert!(attrs.set("cx", "99"));
        assert_eq!(attrs.get("cx").unwrap().value, "99");
        // kind survives a non-numeric overwrite
        assert!(attrs.set("cy", "not a number"));
        assert_eq!(attrs.get("cy").unwrap().kind, AttrKind::Number);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut attrs = AttrMap::new();
        attrs.insert("stroke", AttrValue::text("black"));
        attrs.insert("fill", AttrValue::text("none"));
        attrs.insert("stroke", AttrValue::text("red"));
        let names: Vec<&str> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["stroke", "fill"]);
        assert_eq!(attrs.get("stroke").unwrap().value, "red");
    }
}
