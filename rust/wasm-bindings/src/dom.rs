// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DOM-backed explorer surface
//!
//! Renders the tree, the property rows and the category checkboxes into
//! elements the page already contains. Listeners are owned by the surface
//! and dropped (unregistered) whenever the markup they belong to is rebuilt.

use crate::download::trigger_download;
use gloo_events::EventListener;
use ifc_explorer_core::{
    CategoryToggle, Error, ExplorerConfig, ExplorerSurface, NodePath, PropertyPanel, Result,
    TreeEntry, TreeView, UiEvent,
};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

/// Callback receiving every event raised by the markup.
pub type Dispatch = Rc<dyn Fn(UiEvent)>;

/// Page elements the surface renders into.
#[derive(Debug, Clone)]
pub struct SurfaceElements {
    pub document: Document,
    pub tree_root: Element,
    pub property_root: Element,
    pub checkbox_container: Element,
    pub progress_text: Option<Element>,
}

impl SurfaceElements {
    /// Look up the containers named by `config`.
    ///
    /// The progress element is optional; every other container must exist.
    pub fn locate(document: &Document, config: &ExplorerConfig) -> Result<Self> {
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| Error::Surface(format!("no element with id '{}'", id)))
        };
        let checkbox_container = document
            .get_elements_by_class_name(&config.checkbox_container_class)
            .item(0)
            .ok_or_else(|| {
                Error::Surface(format!(
                    "no element with class '{}'",
                    config.checkbox_container_class
                ))
            })?;

        Ok(Self {
            document: document.clone(),
            tree_root: by_id(&config.tree_root_id)?,
            property_root: by_id(&config.property_root_id)?,
            checkbox_container,
            progress_text: config
                .progress_text_id
                .as_deref()
                .and_then(|id| document.get_element_by_id(id)),
        })
    }
}

/// Caret and child list of a rendered branch.
struct BranchNodes {
    caret: Element,
    nested: Element,
}

pub struct DomSurface {
    elements: SurfaceElements,
    dispatch: Dispatch,
    tree_listeners: RefCell<Vec<EventListener>>,
    branches: RefCell<FxHashMap<NodePath, BranchNodes>>,
    checkbox_listeners: RefCell<Vec<EventListener>>,
}

impl DomSurface {
    pub fn new(elements: SurfaceElements, dispatch: Dispatch) -> Self {
        Self {
            elements,
            dispatch,
            tree_listeners: RefCell::new(Vec::new()),
            branches: RefCell::new(FxHashMap::default()),
            checkbox_listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn elements(&self) -> &SurfaceElements {
        &self.elements
    }

    fn create(&self, tag: &str) -> Result<Element> {
        self.elements.document.create_element(tag).map_err(dom_error)
    }

    fn listen(&self, target: &Element, event_type: &'static str, event: UiEvent) -> EventListener {
        let dispatch = Rc::clone(&self.dispatch);
        EventListener::new(target, event_type, move |_| dispatch(event.clone()))
    }

    fn render_entry(
        &self,
        parent: &Element,
        entry: &TreeEntry,
        path: &mut NodePath,
        listeners: &mut Vec<EventListener>,
        branches: &mut FxHashMap<NodePath, BranchNodes>,
    ) -> Result<()> {
        let item = self.create("li")?;
        match entry {
            TreeEntry::Leaf { label, .. } => {
                item.class_list().add_1("leaf-node").map_err(dom_error)?;
                item.set_text_content(Some(label.as_str()));
                if let Some(preview) = entry.pointer_enter_event() {
                    listeners.push(self.listen(&item, "mouseenter", preview));
                }
                listeners.push(self.listen(&item, "click", entry.click_event(path)));
            }
            TreeEntry::Branch {
                label,
                expanded,
                children,
                ..
            } => {
                let caret = self.create("span")?;
                caret.class_list().add_1("caret").map_err(dom_error)?;
                caret.set_text_content(Some(label.as_str()));
                listeners.push(self.listen(&caret, "click", entry.click_event(path)));

                let nested = self.create("ul")?;
                nested.class_list().add_1("nested").map_err(dom_error)?;
                set_expanded_classes(&caret, &nested, *expanded)?;

                item.append_child(&caret).map_err(dom_error)?;
                item.append_child(&nested).map_err(dom_error)?;

                for (index, child) in children.iter().enumerate() {
                    path.push(index);
                    self.render_entry(&nested, child, path, listeners, branches)?;
                    path.pop();
                }
                branches.insert(path.clone(), BranchNodes { caret, nested });
            }
        }
        parent.append_child(&item).map_err(dom_error)?;
        Ok(())
    }
}

impl ExplorerSurface for DomSurface {
    fn show_tree(&self, view: &TreeView) -> Result<()> {
        remove_all_children(&self.elements.tree_root)?;
        self.tree_listeners.borrow_mut().clear();
        self.branches.borrow_mut().clear();

        let mut listeners = Vec::new();
        let mut branches = FxHashMap::default();
        self.render_entry(
            &self.elements.tree_root,
            view.root(),
            &mut Vec::new(),
            &mut listeners,
            &mut branches,
        )?;

        *self.tree_listeners.borrow_mut() = listeners;
        *self.branches.borrow_mut() = branches;
        Ok(())
    }

    fn set_branch_expanded(&self, path: &[usize], expanded: bool) -> Result<()> {
        let branches = self.branches.borrow();
        let nodes = branches
            .get(path)
            .ok_or_else(|| Error::Surface(format!("no rendered branch at {:?}", path)))?;
        set_expanded_classes(&nodes.caret, &nodes.nested, expanded)
    }

    fn show_properties(&self, panel: &PropertyPanel) -> Result<()> {
        let root = &self.elements.property_root;
        remove_all_children(root)?;
        for row in panel.rows() {
            let item = self.create("div")?;
            item.class_list()
                .add_1("ifc-property-item")
                .map_err(dom_error)?;

            let key = self.create("div")?;
            key.set_text_content(Some(row.key.as_str()));
            item.append_child(&key).map_err(dom_error)?;

            let value = self.create("div")?;
            value
                .class_list()
                .add_1("ifc-property-value")
                .map_err(dom_error)?;
            value.set_text_content(Some(row.value.as_str()));
            item.append_child(&value).map_err(dom_error)?;

            root.append_child(&item).map_err(dom_error)?;
        }
        Ok(())
    }

    fn clear_properties(&self) -> Result<()> {
        remove_all_children(&self.elements.property_root)
    }

    fn show_categories(&self, toggles: &[CategoryToggle]) -> Result<()> {
        let container = &self.elements.checkbox_container;
        remove_all_children(container)?;
        self.checkbox_listeners.borrow_mut().clear();

        let mut listeners = Vec::with_capacity(toggles.len());
        for toggle in toggles {
            let row = self.create("div")?;
            row.set_text_content(Some(toggle.display_name.as_str()));

            let input: HtmlInputElement = self
                .create("input")?
                .dyn_into()
                .map_err(|_| Error::Surface("input is not an HtmlInputElement".to_string()))?;
            input.set_type("checkbox");
            input.set_checked(toggle.checked);
            input.set_id(&toggle.category_id.to_string());
            row.append_child(&input).map_err(dom_error)?;
            container.append_child(&row).map_err(dom_error)?;

            let dispatch = Rc::clone(&self.dispatch);
            let category = toggle.category_id;
            let checkbox = input.clone();
            listeners.push(EventListener::new(&input, "change", move |_| {
                dispatch(UiEvent::ToggleCategory {
                    category,
                    visible: checkbox.checked(),
                })
            }));
        }

        *self.checkbox_listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn offer_download(&self, file_name: &str, data: &[u8]) -> Result<()> {
        trigger_download(&self.elements.document, file_name, data)
    }

    fn show_progress(&self, percent: u32) -> Result<()> {
        if let Some(text) = &self.elements.progress_text {
            text.set_text_content(Some(percent.to_string().as_str()));
        }
        Ok(())
    }
}

fn set_expanded_classes(caret: &Element, nested: &Element, expanded: bool) -> Result<()> {
    nested
        .class_list()
        .toggle_with_force("active", expanded)
        .map_err(dom_error)?;
    caret
        .class_list()
        .toggle_with_force("caret-down", expanded)
        .map_err(dom_error)?;
    Ok(())
}

fn remove_all_children(element: &Element) -> Result<()> {
    while let Some(child) = element.first_child() {
        element.remove_child(&child).map_err(dom_error)?;
    }
    Ok(())
}

fn dom_error(err: JsValue) -> Error {
    Error::Surface(crate::utils::js_message(&err))
}
