//! Composition root: wires the document, the auto-advance countdown, the
//! per-surface scroll engines, the snapshot store, and the sync coordinator
//! behind one host-facing API.
//!
//! Everything here runs on the host's single control thread. Time is always
//! passed in, never sampled, so the whole engine is deterministic under test.

use std::collections::HashMap;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, TimeControlMode};
use crate::document::Document;
use crate::event::PrompterEvent;
use crate::scheduler::AutoAdvanceScheduler;
use crate::scroll::{speed, DisplaySyncCoordinator, ScrollEngine, ScrollPositionStore};
use crate::surface::{DisplaySurface, SurfaceId};

pub struct Prompter {
    document: Document,
    scheduler: AutoAdvanceScheduler,
    store: ScrollPositionStore,
    sync: DisplaySyncCoordinator,
    primary_engine: ScrollEngine,
    secondary_engine: ScrollEngine,
    primary: Box<dyn DisplaySurface>,
    secondary: Option<Box<dyn DisplaySurface>>,
    secondary_enabled: bool,
    control_value: u32,
    event_tx: Option<mpsc::UnboundedSender<PrompterEvent>>,
}

impl Prompter {
    pub fn new(config: &AppConfig, primary: Box<dyn DisplaySurface>) -> Self {
        let actual = speed::actual_speed(config.scroll.control_value);
        Self {
            document: Document::new(),
            scheduler: AutoAdvanceScheduler::new(
                config.playback.time_control,
                config.playback.paragraph_duration_secs,
            ),
            store: ScrollPositionStore::new(),
            sync: DisplaySyncCoordinator::new(),
            primary_engine: ScrollEngine::new(actual),
            secondary_engine: ScrollEngine::new(actual),
            primary,
            secondary: None,
            secondary_enabled: false,
            control_value: config.scroll.control_value,
            event_tx: None,
        }
    }

    /// Attach the mirrored secondary surface (disabled until toggled on).
    pub fn with_secondary_surface(mut self, surface: Box<dyn DisplaySurface>) -> Self {
        self.secondary = Some(surface);
        self
    }

    /// Set the event sender for UI notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<PrompterEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn send_event(&self, event: PrompterEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send prompter event: receiver dropped");
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    pub fn is_scrolling(&self) -> bool {
        self.primary_engine.is_running()
    }

    pub fn control_value(&self) -> u32 {
        self.control_value
    }

    /// Effective scroll speed in pixels/sec.
    pub fn scroll_speed(&self) -> f64 {
        self.primary_engine.speed()
    }

    fn secondary_active(&self) -> bool {
        self.secondary_enabled && self.secondary.is_some()
    }

    /// Replace the script text in place (open, paste, live edit).
    ///
    /// The scroll position is snapshotted before re-segmentation and restored
    /// by percentage afterwards, so an edit that grows or shrinks the
    /// rendered text keeps the reader's place. The countdown is deliberately
    /// left alone; only navigation and config changes restart it.
    pub fn set_text(&mut self, now: Instant, text: &str) {
        let snapshot = self.store.save(
            self.primary.scroll_position(),
            self.primary.max_scroll_extent(),
            self.primary_engine.is_running(),
        );
        self.send_event(PrompterEvent::ScrollSaved {
            offset_percentage: snapshot.offset_percentage,
        });

        self.document.set_text(text);
        self.scheduler
            .set_overrides(self.document.duration_overrides().clone());
        self.store
            .set_current_paragraph(self.document.current_index());

        self.send_event(PrompterEvent::ParagraphsUpdated {
            count: self.document.total_paragraphs(),
        });
        self.send_event(PrompterEvent::ParagraphChanged {
            index: self.document.current_index(),
        });
        self.update_display(now, false);
    }

    /// Wipe the script and every scroll snapshot.
    pub fn clear(&mut self, now: Instant) {
        self.document.clear();
        self.scheduler.set_overrides(HashMap::new());
        self.store.clear();

        self.send_event(PrompterEvent::ParagraphsUpdated { count: 1 });
        self.send_event(PrompterEvent::ParagraphChanged { index: 0 });
        self.update_display(now, true);
    }

    /// Start scrolling on all active surfaces and the auto-advance countdown.
    pub fn start(&mut self, now: Instant) {
        self.primary_engine.start(now);
        if self.secondary_active() {
            self.secondary_engine.start(now);
        }
        self.scheduler.start(now, self.document.current_index());
        info!(
            index = self.document.current_index(),
            speed = self.primary_engine.speed(),
            "prompter started"
        );
    }

    /// Pause scrolling and the countdown; both resume exactly where they were.
    pub fn pause(&mut self, now: Instant) {
        self.primary_engine.stop();
        self.secondary_engine.stop();
        self.scheduler.stop(now);
        info!("prompter paused");
    }

    /// Jump both surfaces back to the top without touching playback state.
    pub fn reset_scroll(&mut self, now: Instant) {
        self.primary_engine.reset(now);
        self.primary.set_scroll_position(0.0);
        if self.secondary_active() {
            self.secondary_engine.reset(now);
            if let Some(sec) = self.secondary.as_mut() {
                sec.set_scroll_position(0.0);
            }
        }
    }

    /// Apply a new speed control value to both engines.
    pub fn set_control_value(&mut self, value: u32) {
        self.control_value = value;
        let actual = speed::actual_speed(value);
        self.primary_engine.set_speed(actual);
        self.secondary_engine.set_speed(actual);
        debug!(control = value, speed = actual, "scroll speed changed");
    }

    /// Change the global paragraph duration and re-arm the countdown.
    pub fn set_global_duration(&mut self, now: Instant, secs: u32) {
        self.scheduler.set_global_duration(secs);
        self.scheduler.restart(now, self.document.current_index());
    }

    /// Switch between global and per-paragraph timing and re-arm.
    pub fn set_time_control_mode(&mut self, now: Instant, mode: TimeControlMode) {
        self.scheduler.set_mode(mode);
        self.scheduler.restart(now, self.document.current_index());
    }

    /// Manual advance; false (and no state change) at the last paragraph.
    pub fn next(&mut self, now: Instant) -> bool {
        if self.document.next() {
            self.change_paragraph(now);
            true
        } else {
            false
        }
    }

    /// Manual step back; false (and no state change) at the first paragraph.
    pub fn previous(&mut self, now: Instant) -> bool {
        if self.document.previous() {
            self.change_paragraph(now);
            true
        } else {
            false
        }
    }

    /// Jump to a paragraph; false (and no state change) out of range.
    pub fn set_paragraph(&mut self, now: Instant, index: usize) -> bool {
        if self.document.set_index(index) {
            self.change_paragraph(now);
            true
        } else {
            false
        }
    }

    /// Progress-bar scrub: map a [0, 1] fraction onto the paragraph range.
    pub fn seek_paragraph_progress(&mut self, now: Instant, fraction: f64) -> bool {
        let last = self.document.total_paragraphs() - 1;
        let index = (fraction.clamp(0.0, 1.0) * last as f64).round() as usize;
        self.set_paragraph(now, index)
    }

    /// In-paragraph scrub: position both surfaces at a fraction of the
    /// primary's scrollable range.
    pub fn scroll_to_fraction(&mut self, fraction: f64) {
        let target = fraction.clamp(0.0, 1.0) * self.primary.max_scroll_extent();
        self.primary_engine.set_offset(target);
        self.primary
            .set_scroll_position(self.primary_engine.applied_position());
        if self.secondary_active() {
            self.secondary_engine.set_offset(target);
            if let Some(sec) = self.secondary.as_mut() {
                sec.set_scroll_position(self.secondary_engine.applied_position());
            }
        }
    }

    /// Toggle the mirrored surface. Enabling aligns it with the primary.
    pub fn set_secondary_enabled(&mut self, now: Instant, enabled: bool) {
        self.secondary_enabled = enabled;
        if !enabled {
            self.secondary_engine.stop();
            return;
        }
        let text = self.document.current_paragraph().to_string();
        let position = self.primary.scroll_position();
        let offset = self.primary_engine.offset();
        let running = self.primary_engine.is_running();
        if let Some(sec) = self.secondary.as_mut() {
            sec.set_visible_text(&text);
            sec.set_scroll_position(position);
            self.secondary_engine.set_offset(offset);
            if running {
                self.secondary_engine.start(now);
            }
        }
    }

    /// Host notification that a surface was scrolled by user interaction.
    /// Mirrors onto the opposite surface; returns whether anything moved.
    pub fn on_surface_scrolled(&mut self, source: SurfaceId, value: f64) -> bool {
        match source {
            SurfaceId::Primary => {
                if !self.secondary_active() {
                    return false;
                }
                match self.secondary.as_mut() {
                    Some(sec) => {
                        if self.sync.mirror(value, sec.as_mut()) {
                            self.secondary_engine.set_offset(value);
                            true
                        } else {
                            false
                        }
                    }
                    None => false,
                }
            }
            SurfaceId::Secondary => {
                if self.sync.mirror(value, self.primary.as_mut()) {
                    self.primary_engine.set_offset(value);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Shared tick: advances both engines, corrects cross-surface drift, and
    /// fires the auto-advance countdown when due.
    pub fn tick(&mut self, now: Instant) {
        let primary_pos = self.primary_engine.on_tick(now);
        if let Some(pos) = primary_pos {
            self.primary.set_scroll_position(pos);
        }

        if self.secondary_enabled {
            if let Some(sec) = self.secondary.as_mut() {
                if let Some(pos) = self.secondary_engine.on_tick(now) {
                    sec.set_scroll_position(pos);
                }
                // Error correction: independent integration drifts by
                // sub-pixel amounts; snap back once it exceeds epsilon
                if let Some(pos) = primary_pos {
                    if self.sync.mirror(pos, sec.as_mut()) {
                        self.secondary_engine.set_offset(pos);
                    }
                }
            }
        }

        if self.scheduler.poll(now) {
            if self.document.next() {
                debug!(index = self.document.current_index(), "auto-advance fired");
                self.change_paragraph(now);
            } else {
                // Last paragraph: stop the countdown, keep scrolling
                self.scheduler.stop(now);
                info!("auto-advance reached the last paragraph");
                self.send_event(PrompterEvent::PlaybackFinished);
            }
        }
    }

    /// Paragraph switch sequence. Order matters: the change event goes out
    /// first, then the new text reaches the surfaces, then the scroll resets
    /// to the top, and only then does motion resume, so a surface is never
    /// scrolled against the previous paragraph's text.
    fn change_paragraph(&mut self, now: Instant) {
        let index = self.document.current_index();
        self.store.set_current_paragraph(index);
        self.send_event(PrompterEvent::ParagraphChanged { index });
        self.scheduler.restart(now, index);
        self.update_display(now, true);
    }

    fn update_display(&mut self, now: Instant, is_paragraph_switch: bool) {
        let was_running = self.primary_engine.is_running();
        self.primary_engine.stop();
        self.secondary_engine.stop();

        let text = self.document.current_paragraph().to_string();
        self.primary.set_visible_text(&text);
        if let Some(sec) = self.secondary.as_mut() {
            sec.set_visible_text(&text);
        }

        if is_paragraph_switch {
            // Every paragraph starts from its top
            self.primary_engine.reset(now);
            self.secondary_engine.reset(now);
            self.primary.set_scroll_position(0.0);
            if self.secondary_active() {
                if let Some(sec) = self.secondary.as_mut() {
                    sec.set_scroll_position(0.0);
                }
            }
        } else if let Some(offset) = self
            .store
            .restore(self.primary.max_scroll_extent(), false)
        {
            self.primary_engine.set_offset(offset);
            self.secondary_engine.set_offset(offset);
            self.primary
                .set_scroll_position(self.primary_engine.applied_position());
            if self.secondary_active() {
                if let Some(sec) = self.secondary.as_mut() {
                    sec.set_scroll_position(self.secondary_engine.applied_position());
                }
            }
            self.send_event(PrompterEvent::ScrollRestored { offset });
        }

        if was_running {
            self.primary_engine.start(now);
            if self.secondary_active() {
                self.secondary_engine.start(now);
            }
        }
    }
}
