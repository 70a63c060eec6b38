//! Manifest node types and their JSON shape

use serde::{Serialize, Serializer};

use crate::classify::ItemType;

/// Root of the manifest document. The root folder itself is not a node;
/// only its children are listed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Manifest {
    pub items: Vec<ManifestNode>,
}

/// One entry in a folder listing.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ManifestNode {
    Folder(Folder),
    Item(Item),
}

impl ManifestNode {
    pub fn name(&self) -> &str {
        match self {
            ManifestNode::Folder(f) => &f.name,
            ManifestNode::Item(i) => &i.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ManifestNode::Folder(f) => &f.path,
            ManifestNode::Item(i) => &i.path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, ManifestNode::Folder(_))
    }

    pub fn is_reference(&self) -> bool {
        match self {
            ManifestNode::Folder(f) => f.reference,
            ManifestNode::Item(i) => i.reference,
        }
    }

    pub fn is_starred(&self) -> bool {
        match self {
            ManifestNode::Folder(f) => f.star,
            ManifestNode::Item(i) => i.star,
        }
    }

    pub fn set_reference(&mut self) {
        match self {
            ManifestNode::Folder(f) => f.reference = true,
            ManifestNode::Item(i) => i.reference = true,
        }
    }

    pub fn set_star(&mut self, star: bool) {
        match self {
            ManifestNode::Folder(f) => f.star = star,
            ManifestNode::Item(i) => i.star = star,
        }
    }
}

/// Serialized as the literal `"folder"` so consumers can tell folders apart
/// from items by `type` alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderTag {
    #[default]
    Folder,
}

#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    #[serde(rename = "type")]
    pub tag: FolderTag,
    pub name: String,
    pub path: String,
    pub items: Vec<ManifestNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(
        skip_serializing_if = "is_false",
        serialize_with = "serialize_reference"
    )]
    pub reference: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub star: bool,
}

impl Folder {
    pub fn new(name: impl Into<String>, path: impl Into<String>, items: Vec<ManifestNode>) -> Self {
        Self {
            tag: FolderTag::Folder,
            name: name.into(),
            path: path.into(),
            items,
            image: None,
            desc: None,
            reference: false,
            star: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    pub path: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        skip_serializing_if = "is_false",
        serialize_with = "serialize_reference"
    )]
    pub reference: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub star: bool,
}

impl Item {
    pub fn new(item_type: ItemType, name: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self {
            item_type,
            name: name.into(),
            path: path.into(),
            size,
            url: None,
            reference: false,
            star: false,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn serialize_reference<S: Serializer>(_: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("Yes")
}
