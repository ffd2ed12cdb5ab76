use std::io;
use std::time::Duration;

use wisp_editor::{EditorConfig, Scheduler, SchedulerHandles, Step, Surface, Terminal};

/// Longest stretch of inactivity `settle` waits through.
pub const IDLE: Duration = Duration::from_millis(100);

/// Terminal that keeps every frame in memory.
#[derive(Debug, Default)]
pub struct MemoryTerminal {
	pub width: u16,
	pub height: u16,
	pub frames: Vec<Vec<Surface>>,
}

impl MemoryTerminal {
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			frames: Vec::new(),
		}
	}

	/// The last frame flattened into rows of text, borders left blank.
	pub fn screen(&self) -> Vec<String> {
		let mut grid = vec![vec![' '; usize::from(self.width)]; usize::from(self.height)];
		for surface in self.frames.last().into_iter().flatten() {
			let area = surface.client_area();
			for (dy, row) in surface.buffer.rows().enumerate() {
				for (dx, cell) in row.iter().enumerate() {
					if cell.is_continuation() {
						continue;
					}
					let (x, y) = (usize::from(area.x) + dx, usize::from(area.y) + dy);
					if let Some(slot) = grid.get_mut(y).and_then(|line| line.get_mut(x)) {
						*slot = cell.ch;
					}
				}
			}
		}
		grid.into_iter().map(|line| line.into_iter().collect()).collect()
	}
}

impl Terminal for MemoryTerminal {
	fn size(&self) -> io::Result<(u16, u16)> {
		Ok((self.width, self.height))
	}

	fn draw(&mut self, surfaces: &[Surface]) -> io::Result<()> {
		self.frames.push(surfaces.to_vec());
		Ok(())
	}
}

pub fn scheduler() -> (Scheduler<MemoryTerminal>, SchedulerHandles) {
	scheduler_with(EditorConfig::default())
}

pub fn scheduler_with(config: EditorConfig) -> (Scheduler<MemoryTerminal>, SchedulerHandles) {
	Scheduler::new(config, MemoryTerminal::new(80, 24))
}

/// How a `settle` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
	Idle,
	Quit,
}

/// Steps the loop until it quits or nothing happens for [`IDLE`].
pub async fn settle(scheduler: &mut Scheduler<MemoryTerminal>) -> Settled {
	loop {
		match tokio::time::timeout(IDLE, scheduler.step()).await {
			Ok(Step::Continue) => continue,
			Ok(Step::Quit) => return Settled::Quit,
			Err(_) => return Settled::Idle,
		}
	}
}
