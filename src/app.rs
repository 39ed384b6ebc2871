// src/app.rs
//
// Window glue. Everything here is forwarding: the event loop calls
// `resize(w, h)` on surface changes and `render()` once per redraw, and the
// pipeline owns the rest.

use std::sync::Arc;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::pipeline::PathTracer;

pub async fn run(event_loop: EventLoop<()>, window: Arc<Window>) {
    let size = window.inner_size();
    let mut tracer = match PathTracer::new(window.clone(), size.width, size.height).await {
        Ok(tracer) => tracer,
        Err(err) => {
            log::error!("pipeline construction failed: {err}");
            return;
        }
    };

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::AboutToWait => {
                    window.request_redraw();
                }

                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),

                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = tracer.resize(new_size.width, new_size.height) {
                            log::error!("resize failed: {err}");
                            elwt.exit();
                        }
                    }

                    WindowEvent::RedrawRequested => {
                        if let Err(err) = tracer.render() {
                            log::error!("render failed: {err}");
                            elwt.exit();
                        }
                        if tracer.sample_index() % 256 == 0 {
                            log::debug!("accumulated {} samples", tracer.sample_index());
                        }
                    }

                    _ => {}
                },

                _ => {}
            }
        })
        .unwrap();
}
