//! The window tree and its docking layout.
//!
//! Windows form a strict tree rooted at a window that lives as long as the
//! editor. Every non-floating docking slot holds at most one child per
//! parent; floating children are unconstrained.
//!
//! Layout runs top-down in absolute screen coordinates. A window's client
//! area is its rectangle minus its border. Side-docked children claim their
//! natural extent from the client area in the order top, bottom, left,
//! right; the `fill` child takes what remains. Floating children are sized
//! once, at creation, and never moved by parent resizes.

use std::fmt::Write as _;

use rustc_hash::FxHashMap as HashMap;
use wisp_events::EventRegistry;
use wisp_primitives::{BorderStyle, CellFormat, Docking, Rect, ViewId, WindowId};

use crate::view::View;
use crate::{Result, WindowError};


/// A node of the tree.
#[derive(Debug)]
pub struct Window {
	id: WindowId,
	parent: Option<WindowId>,
	children: Vec<WindowId>,
	docking: Docking,
	border: BorderStyle,
	rect: Rect,
	view: View,
}

impl Window {
	pub fn id(&self) -> WindowId {
		self.id
	}

	pub fn parent(&self) -> Option<WindowId> {
		self.parent
	}

	/// Children in insertion order.
	pub fn children(&self) -> &[WindowId] {
		&self.children
	}

	pub fn docking(&self) -> Docking {
		self.docking
	}

	pub fn border(&self) -> BorderStyle {
		self.border
	}

	/// Absolute rectangle, border included.
	pub fn rect(&self) -> Rect {
		self.rect
	}

	/// Rectangle handed to the view and to docked children.
	pub fn client_area(&self) -> Rect {
		self.rect.inset(self.border.width())
	}

	pub fn view(&self) -> &View {
		&self.view
	}

	pub fn view_mut(&mut self) -> &mut View {
		&mut self.view
	}
}

/// Arena of windows indexed by id.
#[derive(Debug)]
pub struct WindowTree {
	windows: HashMap<WindowId, Window>,
	root: WindowId,
	next_window: u64,
	next_view: u64,
	events: EventRegistry,
}

impl WindowTree {
	/// Creates a tree whose root hosts `root_view`.
	///
	/// The root starts with an empty rectangle; size it with [`set_rect`](Self::set_rect).
	pub fn new(events: EventRegistry, mut root_view: View) -> Self {
		let root = WindowId(0);
		root_view.set_id(ViewId(0));
		let view_id = root_view.id();
		let window = Window {
			id: root,
			parent: None,
			children: Vec::new(),
			docking: Docking::Fill,
			border: root_view.border(),
			rect: Rect::ZERO,
			view: root_view,
		};
		let mut windows = HashMap::default();
		windows.insert(root, window);
		events.trigger_view_created(view_id);
		events.trigger_window_created(root);
		Self {
			windows,
			root,
			next_window: 1,
			next_view: 1,
			events,
		}
	}

	pub fn root(&self) -> WindowId {
		self.root
	}

	pub fn events(&self) -> &EventRegistry {
		&self.events
	}

	pub fn len(&self) -> usize {
		self.windows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.windows.is_empty()
	}

	pub fn contains(&self, id: WindowId) -> bool {
		self.windows.contains_key(&id)
	}

	pub fn get(&self, id: WindowId) -> Option<&Window> {
		self.windows.get(&id)
	}

	pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
		self.windows.get_mut(&id)
	}

	pub fn view(&self, id: WindowId) -> Option<&View> {
		self.get(id).map(Window::view)
	}

	pub fn view_mut(&mut self, id: WindowId) -> Option<&mut View> {
		self.get_mut(id).map(Window::view_mut)
	}

	pub fn parent(&self, id: WindowId) -> Option<WindowId> {
		self.get(id)?.parent
	}

	pub fn children(&self, id: WindowId) -> &[WindowId] {
		self.get(id).map_or(&[], Window::children)
	}

	pub fn docking(&self, id: WindowId) -> Option<Docking> {
		self.get(id).map(Window::docking)
	}

	pub fn rect(&self, id: WindowId) -> Option<Rect> {
		self.get(id).map(Window::rect)
	}

	/// Top-left corner of the window.
	pub fn position(&self, id: WindowId) -> Option<(u16, u16)> {
		self.rect(id).map(|rect| (rect.x, rect.y))
	}

	/// Child of `parent` occupying `docking`, for exclusive slots.
	pub fn child_at(&self, parent: WindowId, docking: Docking) -> Option<WindowId> {
		if !docking.is_exclusive() {
			return None;
		}
		self.children(parent)
			.iter()
			.copied()
			.find(|child| self.docking(*child) == Some(docking))
	}

	/// Fails if `parent` does not exist or its `docking` slot is taken.
	pub fn check_slot(&self, parent: WindowId, docking: Docking) -> Result<()> {
		if !self.contains(parent) {
			return Err(WindowError::UnknownWindow(parent));
		}
		if self.child_at(parent, docking).is_some() {
			return Err(WindowError::DockingOccupied { parent, docking });
		}
		Ok(())
	}

	/// Docks `view` in `parent`.
	///
	/// Fails without touching the tree if the slot is taken. On success
	/// publishes `view-created` and `window-created` and lays the new window
	/// out: a floating window is centred in the parent's client area at its
	/// natural size; otherwise the parent's docked children are laid out
	/// again, since the newcomer shrinks the `fill` sibling.
	pub fn new_child_window(&mut self, parent: WindowId, mut view: View, docking: Docking) -> Result<WindowId> {
		self.check_slot(parent, docking)?;
		let client = self.get(parent).ok_or(WindowError::UnknownWindow(parent))?.client_area();

		let id = WindowId(self.next_window);
		self.next_window += 1;
		view.set_id(ViewId(self.next_view));
		self.next_view += 1;
		let view_id = view.id();
		let natural = view.natural_size();

		self.windows.insert(
			id,
			Window {
				id,
				parent: Some(parent),
				children: Vec::new(),
				docking,
				border: view.border(),
				rect: Rect::ZERO,
				view,
			},
		);
		if let Some(window) = self.windows.get_mut(&parent) {
			window.children.push(id);
		}

		tracing::debug!(window = %id, %parent, %docking, "window.created");
		self.events.trigger_view_created(view_id);
		self.events.trigger_window_created(id);

		if docking == Docking::Floating {
			let width = natural.width.resolve(client.width);
			let height = natural.height.resolve(client.height);
			self.set_rect(id, client.centered(width, height))?;
		} else {
			self.layout_children(parent);
		}
		Ok(id)
	}

	/// Assigns `rect` to `id` and lays out its subtree.
	///
	/// Publishes `window-resized` for every window whose rectangle changed.
	pub fn set_rect(&mut self, id: WindowId, rect: Rect) -> Result<()> {
		let window = self.windows.get_mut(&id).ok_or(WindowError::UnknownWindow(id))?;
		if window.rect != rect {
			window.rect = rect;
			tracing::trace!(window = %id, %rect, "window.resized");
			self.events.trigger_window_resized(id);
		}
		let client = window.client_area();
		window.view.resize(client.width, client.height);
		self.layout_children(id);
		Ok(())
	}

	fn layout_children(&mut self, id: WindowId) {
		let Some(window) = self.get(id) else {
			return;
		};
		let mut remaining = window.client_area();
		let mut assigned = Vec::with_capacity(window.children.len());

		for side in Docking::SIDES {
			let Some(child) = self.child_at(id, side) else {
				continue;
			};
			let Some(natural) = self.view(child).map(View::natural_size) else {
				continue;
			};
			let (taken, rest) = match side {
				Docking::Top => remaining.take_top(natural.height.resolve(remaining.height)),
				Docking::Bottom => remaining.take_bottom(natural.height.resolve(remaining.height)),
				Docking::Left => remaining.take_left(natural.width.resolve(remaining.width)),
				_ => remaining.take_right(natural.width.resolve(remaining.width)),
			};
			assigned.push((child, taken));
			remaining = rest;
		}
		if let Some(child) = self.child_at(id, Docking::Fill) {
			assigned.push((child, remaining));
		}

		for (child, rect) in assigned {
			let _ = self.set_rect(child, rect);
		}
	}

	/// Detaches `child` from `parent`, checking the relationship first.
	pub fn remove_child(&mut self, parent: WindowId, child: WindowId) -> Result<Vec<WindowId>> {
		if self.parent(child) != Some(parent) {
			return Err(WindowError::NotAChild { parent, child });
		}
		self.remove(child)
	}

	/// Detaches `id` and its whole subtree, closing every view in it.
	///
	/// Returns the removed ids, `id` first. The parent's remaining docked
	/// children are laid out again.
	pub fn remove(&mut self, id: WindowId) -> Result<Vec<WindowId>> {
		if id == self.root {
			return Err(WindowError::RootRemoval);
		}
		let parent = self.parent(id).ok_or(WindowError::UnknownWindow(id))?;
		let removed = self.subtree(id);

		if let Some(window) = self.windows.get_mut(&parent) {
			window.children.retain(|child| *child != id);
		}
		for window in &removed {
			if let Some(mut window) = self.windows.remove(window) {
				window.view.close();
			}
		}
		tracing::debug!(window = %id, count = removed.len(), "window.removed");
		self.layout_children(parent);
		Ok(removed)
	}

	/// `id` followed by its descendants, depth first.
	pub fn subtree(&self, id: WindowId) -> Vec<WindowId> {
		let mut out = Vec::new();
		let mut stack = vec![id];
		while let Some(current) = stack.pop() {
			if !self.contains(current) {
				continue;
			}
			out.push(current);
			stack.extend(self.children(current).iter().rev().copied());
		}
		out
	}

	/// Format of the nearest view, starting at `id`, that sets one.
	pub fn default_format(&self, id: WindowId) -> CellFormat {
		let mut current = Some(id);
		while let Some(window) = current {
			if let Some(format) = self.view(window).and_then(View::format) {
				return format;
			}
			current = self.parent(window);
		}
		CellFormat::default()
	}

	/// Windows in paint order: parents before children, floating windows
	/// (with their own subtrees) after every docked window.
	pub fn draw_order(&self) -> Vec<WindowId> {
		let mut out = Vec::with_capacity(self.windows.len());
		let mut floating = std::collections::VecDeque::new();
		self.visit_docked(self.root, &mut out, &mut floating);
		while let Some(id) = floating.pop_front() {
			self.visit_docked(id, &mut out, &mut floating);
		}
		out
	}

	fn visit_docked(
		&self,
		id: WindowId,
		out: &mut Vec<WindowId>,
		floating: &mut std::collections::VecDeque<WindowId>,
	) {
		out.push(id);
		for &child in self.children(id) {
			if self.docking(child) == Some(Docking::Floating) {
				floating.push_back(child);
			} else {
				self.visit_docked(child, out, floating);
			}
		}
	}

	/// Debug dump of the subtree rooted at `id`, one window per line.
	pub fn tree(&self, id: WindowId) -> String {
		let mut out = String::new();
		self.dump(id, 0, &mut out);
		out
	}

	fn dump(&self, id: WindowId, depth: usize, out: &mut String) {
		let Some(window) = self.get(id) else {
			return;
		};
		let view = window.view();
		let _ = writeln!(
			out,
			"{:indent$}- {} {} {} \"{}\"{}",
			"",
			id,
			window.docking,
			window.rect,
			view.title(),
			if view.is_disabled() { " disabled" } else { "" },
			indent = depth * 2,
		);
		for &child in &window.children {
			self.dump(child, depth + 1, out);
		}
	}
}
