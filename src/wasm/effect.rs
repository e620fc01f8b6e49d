//! The effect itself: scene construction, the frame loop, and event wiring.
//!
//! `Effect` owns every piece of mutable state; nothing lives in module-level
//! globals. Callers get a [`FrameHandle`] back from [`start`] and can cancel
//! the loop deterministically.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, HtmlElement, HtmlImageElement, MouseEvent,
    WebGl2RenderingContext as GL, WebGlTexture, Window,
};

use crate::camera::Camera;
use crate::geometry::PlaneMesh;
use crate::layout::{plane_position, Bounds, Viewport};
use crate::material::{HoverMode, MaterialState, MaterialTemplate};
use crate::picking::{nearest_hit, pointer_to_ndc, Quad};
use crate::scene;
use crate::scroll::ScrollTracker;
use crate::shaders;

use super::assets;
use super::gl::{self, MeshBuffers, Program};

/// Fixed per-tick increment of the shader time uniform.
const TIME_STEP: f32 = 0.05;

pub struct EffectOptions {
    pub container: HtmlElement,
    /// Web fonts the page must finish loading before the scene is measured.
    pub fonts: Vec<String>,
    pub hover_mode: HoverMode,
    /// URL of the decorative texture installed in every material.
    pub ocean_src: String,
}

/// One page image and its GPU counterpart. The bounding box is cached at
/// build time; repositioning only ever recombines it with the scroll offset.
struct ImagePlane {
    _img: HtmlImageElement,
    buffers: MeshBuffers,
    texture: WebGlTexture,
    material: MaterialState,
    bounds: Bounds,
    position: Vec2,
}

pub struct Effect {
    window: Window,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    gl: GL,
    program: Program,
    ocean: WebGlTexture,
    camera: Camera,
    tracker: ScrollTracker,
    planes: Vec<ImagePlane>,
    time: f32,
    width: f32,
    height: f32,
    hover_mode: HoverMode,
}

impl Effect {
    fn new(
        window: Window,
        document: &Document,
        options: EffectOptions,
        ocean_img: &HtmlImageElement,
    ) -> Result<Self, JsValue> {
        let container = options.container;
        let width = container.offset_width() as f32;
        let height = container.offset_height() as f32;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        container.append_child(&canvas)?;

        let gl = gl::context(&canvas)?;
        let template = MaterialTemplate::new(shaders::VERTEX, shaders::FRAGMENT);
        let program = Program::new(&gl, template.vertex_source, template.fragment_source)?;
        let ocean = gl::texture_from_image(&gl, ocean_img)?;

        let mut tracker = ScrollTracker::new();
        let scroll = window.scroll_y()? as f32;
        tracker.reset_to(scroll);

        let mut effect = Self {
            window,
            canvas,
            container,
            gl,
            program,
            ocean,
            camera: Camera::new(width, height),
            tracker,
            planes: Vec::new(),
            time: 0.0,
            width,
            height,
            hover_mode: options.hover_mode,
        };
        effect.build_scene(document, &template, scroll)?;
        effect.set_positions();
        Ok(effect)
    }

    /// One plane per measured image record, in document order. Zero-sized
    /// images still get a plane; picking ignores them.
    fn build_scene(
        &mut self,
        document: &Document,
        template: &MaterialTemplate,
        scroll: f32,
    ) -> Result<(), JsValue> {
        for record in scene::measure_images(document, scroll)? {
            let mesh = PlaneMesh::new(record.bounds.width, record.bounds.height);
            let buffers = gl::upload_mesh(&self.gl, &mesh)?;
            let texture = gl::texture_from_image(&self.gl, &record.element)?;
            self.planes.push(ImagePlane {
                _img: record.element,
                buffers,
                texture,
                material: template.instantiate(),
                bounds: record.bounds,
                position: Vec2::ZERO,
            });
        }
        log::info!("scene built: {} image planes", self.planes.len());
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    fn set_positions(&mut self) {
        let scroll = self.tracker.value();
        let viewport = self.viewport();
        for plane in &mut self.planes {
            let (x, y) = plane_position(&plane.bounds, scroll, &viewport);
            plane.position = Vec2::new(x, y);
        }
    }

    /// One frame: advance time, pull scroll, reposition, then draw.
    fn tick(&mut self) -> Result<(), JsValue> {
        self.time += TIME_STEP;
        let raw = self.window.scroll_y()? as f32;
        self.tracker.set_target(raw);
        self.tracker.update();
        self.set_positions();
        self.draw();
        Ok(())
    }

    fn draw(&self) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program.program));

        gl.active_texture(GL::TEXTURE1);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.ocean));

        let view_projection = self.camera.view_projection();
        for plane in &self.planes {
            let model = Mat4::from_translation(Vec3::new(plane.position.x, plane.position.y, 0.0));
            let matrix = view_projection * model;
            gl.uniform_matrix4fv_with_f32_array(
                self.program.matrix.as_ref(),
                false,
                &matrix.to_cols_array(),
            );
            gl.uniform1f(self.program.time.as_ref(), self.time);
            let hover = plane.material.hover();
            gl.uniform2f(self.program.hover.as_ref(), hover.x, hover.y);

            gl.active_texture(GL::TEXTURE0);
            gl.bind_texture(GL::TEXTURE_2D, Some(&plane.texture));
            gl.bind_vertex_array(Some(&plane.buffers.vao));
            gl.draw_elements_with_i32(
                GL::TRIANGLES,
                plane.buffers.index_count,
                GL::UNSIGNED_SHORT,
                0,
            );
        }
        gl.bind_vertex_array(None);
    }

    /// Cast a ray through the pointer and update hover state. The nearest
    /// intersected plane (if any) receives the hit UV; on a miss every plane
    /// applies the configured [`HoverMode`].
    fn pointer_move(&mut self, x: f32, y: f32) {
        let (ndc_x, ndc_y) = pointer_to_ndc(x, y, self.width, self.height);
        let ray = self.camera.ray_from_ndc(ndc_x, ndc_y);
        let quads = self.planes.iter().map(|p| Quad {
            center: p.position,
            width: p.bounds.width,
            height: p.bounds.height,
        });
        match nearest_hit(&ray, quads) {
            Some((index, hit)) => self.planes[index].material.set_hover(hit.uv),
            None => {
                for plane in &mut self.planes {
                    plane.material.on_miss(self.hover_mode);
                }
            }
        }
    }

    fn resize(&mut self) {
        self.width = self.container.offset_width() as f32;
        self.height = self.container.offset_height() as f32;
        self.canvas.set_width(self.width as u32);
        self.canvas.set_height(self.height as u32);
        self.camera.set_viewport(self.width, self.height);
    }
}

/// Handle to the running animation loop. Dropping it does not stop the loop;
/// call [`cancel`](FrameHandle::cancel) for deterministic teardown or
/// [`forget`](FrameHandle::forget) to let the effect run for the page's
/// lifetime.
pub struct FrameHandle {
    raf_id: Rc<Cell<i32>>,
    active: Rc<Cell<bool>>,
}

impl FrameHandle {
    pub fn cancel(&self) -> Result<(), JsValue> {
        if self.active.replace(false) {
            let window = web_sys::window().ok_or("no window")?;
            window.cancel_animation_frame(self.raf_id.get())?;
        }
        Ok(())
    }

    pub fn forget(self) {
        std::mem::forget(self);
    }
}

/// Preload assets, build the scene, wire input, and start the frame loop.
/// This is the single idle→running transition: nothing renders before the
/// preload join resolves.
pub async fn start(options: EffectOptions) -> Result<FrameHandle, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    assets::preload(&window, &document, &options.fonts).await?;
    let ocean_img = assets::load_image(&options.ocean_src).await?;
    log::info!("preload complete");

    let effect = Effect::new(window, &document, options, &ocean_img)?;
    let effect = Rc::new(RefCell::new(effect));
    wire_pointer(&effect)?;
    wire_resize(&effect)?;
    run_frame_loop(effect)
}

fn wire_pointer(effect: &Rc<RefCell<Effect>>) -> Result<(), JsValue> {
    let effect = effect.clone();
    let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
        effect
            .borrow_mut()
            .pointer_move(event.client_x() as f32, event.client_y() as f32);
    }) as Box<dyn FnMut(MouseEvent)>);
    web_sys::window()
        .ok_or("no window")?
        .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_resize(effect: &Rc<RefCell<Effect>>) -> Result<(), JsValue> {
    let effect = effect.clone();
    let closure = Closure::wrap(Box::new(move || {
        effect.borrow_mut().resize();
    }) as Box<dyn FnMut()>);
    web_sys::window()
        .ok_or("no window")?
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Self-rescheduling animation-frame loop. The closure is stored in an
/// `Rc<RefCell<Option<...>>>` so it can reference itself when requesting the
/// next frame; the handle's flag lets `cancel` stop the rescheduling.
fn run_frame_loop(effect: Rc<RefCell<Effect>>) -> Result<FrameHandle, JsValue> {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let raf_id = Rc::new(Cell::new(0));
    let active = Rc::new(Cell::new(true));
    let raf_id_tick = raf_id.clone();
    let active_tick = active.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !active_tick.get() {
            return;
        }
        if let Err(e) = effect.borrow_mut().tick() {
            log::error!("frame error: {:?}", e);
            active_tick.set(false);
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            Ok(id) => raf_id_tick.set(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }) as Box<dyn FnMut()>));

    let window = web_sys::window().ok_or("no window")?;
    let id = window
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;
    raf_id.set(id);

    Ok(FrameHandle { raf_id, active })
}
