use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{SyncCommand, SyncEvent};

use super::components::{banner, chat_area, header, input_bar};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<SyncCommand>,
    event_receiver: mpsc::UnboundedReceiver<SyncEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<SyncCommand>,
        event_receiver: mpsc::UnboundedReceiver<SyncEvent>,
        banner_ttl: Duration,
    ) -> Self {
        Self {
            state: AppState::new(banner_ttl),
            command_sender,
            event_receiver,
        }
    }

    fn handle_sync_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply(event);
        }
    }

    fn send_command(&mut self, command: SyncCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to sync task: {err}");
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_sync_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if header::render(ui, self.state.messages.len()) {
                self.send_command(SyncCommand::ClearHistory);
            }

            let dismissed = match self.state.banner() {
                Some(alert) => banner::render(ui, alert),
                None => false,
            };
            if dismissed {
                self.state.dismiss_banner();
            }
        });

        egui::TopBottomPanel::bottom("input").show(ctx, |ui| {
            if let Some(content) = input_bar::render(ui, &mut self.state) {
                self.send_command(SyncCommand::Send(content));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, &self.state.messages);
        });

        // Events arrive from the sync task without waking the UI.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
