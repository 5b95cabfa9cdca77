mod bus;
mod events;

pub use bus::EventBus;
pub use events::DragEvent;

pub trait EventHandler {
    fn handle_event(&mut self, event: &DragEvent);
}

/// Writes every drag transition to the log
#[derive(Debug, Default)]
pub struct DragLogger;

impl EventHandler for DragLogger {
    fn handle_event(&mut self, event: &DragEvent) {
        match event {
            DragEvent::Started { shape, at } => log::debug!("Drag started on {} at {:?}", shape, at),
            DragEvent::Moved { shape, delta } => log::trace!("Dragged {} by {:?}", shape, delta),
            DragEvent::Ended { shape, total } => log::info!("Dropped {} after moving {:?}", shape, total),
        }
    }
}
