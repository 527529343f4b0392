use glam::Vec3;
use velvet_core::{
    ClothError, ClothLayout, ClothSolver, ClothTopology, ClothVertex, Collider,
    SimulationParameters, Transform,
};
use wasm_bindgen::prelude::*;

mod logging;

pub use logging::init_logging;

fn to_js(err: ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct ClothWorld {
    solver: ClothSolver,
    params: SimulationParameters,
    colliders: Vec<Collider>,
    vertex_buffer: Vec<ClothVertex>,
}

#[wasm_bindgen]
impl ClothWorld {
    /// Hanging cloth of `resolution` cells per edge, top edge centered at
    /// `(x, y, z)`.
    #[wasm_bindgen(constructor)]
    pub fn new(resolution: u32, size: f32, x: f32, y: f32, z: f32) -> Result<ClothWorld, JsValue> {
        let layout = ClothLayout {
            size,
            origin: Vec3::new(x, y, z),
            ..ClothLayout::default()
        };
        Self::with_layout(resolution, &layout)
    }

    /// Build from a JSON `ClothLayout`; missing fields take their defaults.
    #[wasm_bindgen]
    pub fn from_layout_json(resolution: u32, json: &str) -> Result<ClothWorld, JsValue> {
        let layout: ClothLayout =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::with_layout(resolution, &layout)
    }

    /// Run one fixed tick; returns the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, fixed_dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.solver.step(fixed_dt, &self.params, &mut self.colliders);
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<ClothVertex, f32>(&self.vertex_buffer).as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<ClothVertex, u8>(&self.vertex_buffer).len()
    }

    /// Triangle list for the cloth mesh; constant for the world's lifetime.
    #[wasm_bindgen]
    pub fn indices(&self) -> Vec<u32> {
        self.solver.indices().to_vec()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particle_count()
    }

    #[wasm_bindgen]
    pub fn set_solver_config(&mut self, num_substeps: u32, num_iterations: u32) {
        self.params.num_substeps = num_substeps;
        self.params.num_iterations = num_iterations;
    }

    #[wasm_bindgen]
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.params.gravity = Vec3::new(x, y, z);
    }

    #[wasm_bindgen]
    pub fn set_material(
        &mut self,
        damping: f32,
        bend_compliance: f32,
        collision_margin: f32,
        friction: f32,
    ) {
        self.params.damping = damping;
        self.params.bend_compliance = bend_compliance;
        self.params.collision_margin = collision_margin;
        self.params.friction = friction;
    }

    /// Replace the whole parameter set from a JSON object; missing fields
    /// take their defaults.
    #[wasm_bindgen]
    pub fn set_parameters_json(&mut self, json: &str) -> Result<(), JsValue> {
        let params: SimulationParameters =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        params
            .validate()
            .map_err(|e| to_js(ClothError::Config(e)))?;
        self.params = params;
        Ok(())
    }

    /// Add the infinite ground plane; returns its obstacle index.
    #[wasm_bindgen]
    pub fn add_ground_plane(&mut self) -> usize {
        self.colliders.push(Collider::plane());
        self.colliders.len() - 1
    }

    /// Add a sphere obstacle; returns its obstacle index.
    #[wasm_bindgen]
    pub fn add_sphere(&mut self, x: f32, y: f32, z: f32, radius: f32) -> usize {
        self.colliders.push(Collider::sphere(Vec3::new(x, y, z), radius));
        self.colliders.len() - 1
    }

    /// Feed an obstacle's world position and uniform scale for the next tick.
    #[wasm_bindgen]
    pub fn set_obstacle_transform(
        &mut self,
        index: usize,
        x: f32,
        y: f32,
        z: f32,
        scale: f32,
    ) -> Result<(), JsValue> {
        let count = self.colliders.len();
        let collider = self
            .colliders
            .get_mut(index)
            .ok_or_else(|| to_js(ClothError::ObstacleOutOfBounds { index, count }))?;
        collider.set_transform(Transform::from_position_scale(Vec3::new(x, y, z), scale));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn clear_obstacles(&mut self) {
        self.colliders.clear();
    }

    #[wasm_bindgen]
    pub fn pin(&mut self, index: usize) -> Result<(), JsValue> {
        self.solver.pin(index).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn unpin(&mut self, index: usize) -> Result<(), JsValue> {
        self.solver.unpin(index).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.solver.reset();
        self.write_gpu_output();
    }
}

impl ClothWorld {
    fn with_layout(resolution: u32, layout: &ClothLayout) -> Result<ClothWorld, JsValue> {
        let topology = ClothTopology::with_layout(resolution, layout).map_err(to_js)?;
        let solver = ClothSolver::new(topology);

        log::info!(
            "ClothWorld created: resolution {}, {} particles",
            resolution,
            solver.particle_count()
        );

        let mut world = ClothWorld {
            solver,
            params: SimulationParameters::default(),
            colliders: Vec::new(),
            vertex_buffer: Vec::new(),
        };
        world.write_gpu_output();
        Ok(world)
    }

    fn write_gpu_output(&mut self) {
        self.solver.write_vertices(&mut self.vertex_buffer);
    }
}
