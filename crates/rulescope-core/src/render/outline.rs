use serde::Serialize;

use crate::model::{RuleEntry, RuleMap, RuleObject, RuleTypeEntry};

/// A clickable reference to one artifact (n-cube)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactRef {
    pub name: String,
    pub app_id: String,
}

impl ArtifactRef {
    pub fn new(name: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app_id: app_id.into(),
        }
    }

    /// Name of the detail view this artifact opens into
    ///
    /// Opening the same artifact of the same application twice targets the
    /// same view.
    pub fn view_name(&self) -> String {
        format!("{}{}", self.name, self.app_id)
    }
}

/// One item of the outline
///
/// Rule type and object items always carry a child list (possibly empty).
/// Rule method items carry no child list and, when the server sent `ncubes`,
/// an artifact list (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<ArtifactRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<OutlineNode>>,
}

impl OutlineNode {
    fn branch(label: String, children: Vec<OutlineNode>) -> Self {
        Self {
            label,
            artifacts: None,
            children: Some(children),
        }
    }

    fn leaf(label: String, artifacts: Option<Vec<ArtifactRef>>) -> Self {
        Self {
            label,
            artifacts,
            children: None,
        }
    }

    /// Label followed by the bracketed artifact list, e.g. `checkX [N1, N2]`
    pub fn display_label(&self) -> String {
        match &self.artifacts {
            None => self.label.clone(),
            Some(refs) => {
                let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
                format!("{} [{}]", self.label, names.join(", "))
            }
        }
    }

    /// Child items; empty for rule method items
    pub fn child_items(&self) -> &[OutlineNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// The rendered outline container
///
/// Rendering appends; callers clear before a new render so stale content is
/// never shown alongside fresh content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    items: Vec<OutlineNode>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append items after the existing ones
    pub fn append(&mut self, items: Vec<OutlineNode>) {
        self.items.extend(items);
    }

    /// Top-level items
    pub fn items(&self) -> &[OutlineNode] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every artifact reference in depth-first order
    pub fn artifact_refs(&self) -> Vec<&ArtifactRef> {
        let mut refs = Vec::new();
        for item in &self.items {
            collect_refs(item, &mut refs);
        }
        refs
    }

    /// Find a rendered reference by artifact name and application id
    pub fn find_artifact(&self, name: &str, app_id: &str) -> Option<&ArtifactRef> {
        self.artifact_refs()
            .into_iter()
            .find(|r| r.name == name && r.app_id == app_id)
    }
}

fn collect_refs<'a>(node: &'a OutlineNode, refs: &mut Vec<&'a ArtifactRef>) {
    if let Some(artifacts) = &node.artifacts {
        refs.extend(artifacts.iter());
    }
    for child in node.child_items() {
        collect_refs(child, refs);
    }
}

/// Convert a rule map into outline items
///
/// Rule type → object → method, each level in server order. Pure: the same
/// map always yields the same items.
pub fn build_outline(rule_map: &RuleMap) -> Vec<OutlineNode> {
    rule_map
        .iter()
        .map(|(rule_type, entry)| build_rule_type(rule_type, entry))
        .collect()
}

/// Append the outline of `rule_map` to `outline`
pub fn render_rules(outline: &mut Outline, rule_map: &RuleMap) {
    outline.append(build_outline(rule_map));
}

fn build_rule_type(rule_type: &str, entry: &RuleTypeEntry) -> OutlineNode {
    let objects: Vec<OutlineNode> = entry
        .objects
        .iter()
        .map(|(name, object)| build_object(name, object))
        .collect();
    OutlineNode::branch(format!("{} ({})", rule_type, entry.class_name), objects)
}

fn build_object(name: &str, object: &RuleObject) -> OutlineNode {
    let methods: Vec<OutlineNode> = object.rules.iter().map(build_method).collect();
    OutlineNode::branch(name.to_string(), methods)
}

fn build_method(rule: &RuleEntry) -> OutlineNode {
    let artifacts: Option<Vec<ArtifactRef>> = rule.ncubes.as_ref().map(|ncubes| {
        ncubes
            .iter()
            .map(|name| ArtifactRef::new(name.as_str(), rule.app_id.as_str()))
            .collect()
    });
    OutlineNode::leaf(rule.value.clone(), artifacts)
}
