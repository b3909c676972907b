use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const GESTURE_EVENTS: [&str; 2] = ["click", "touchstart"];

/// Listeners for the next click or touch on `target`. They detach themselves
/// on the first event; dropping the subscription detaches them too.
pub struct GestureSubscription {
    target: web::EventTarget,
    func: js_sys::Function,
    _closure: Closure<dyn FnMut(web::Event)>,
}

fn detach(target: &web::EventTarget, func: &js_sys::Function) {
    for ev in GESTURE_EVENTS {
        _ = target.remove_event_listener_with_callback(ev, func);
    }
}

impl Drop for GestureSubscription {
    fn drop(&mut self) {
        detach(&self.target, &self.func);
    }
}

/// Run `on_gesture` once, inside the first click or touchstart on `target`.
/// Both events of a single tap reach the handler; only the first counts.
pub fn arm_resume_on_gesture(
    target: &web::EventTarget,
    on_gesture: impl FnOnce() + 'static,
) -> GestureSubscription {
    let own_func: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));
    let own_func_inner = own_func.clone();
    let target_inner = target.clone();
    let mut pending = Some(on_gesture);
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let Some(callback) = pending.take() else {
            return;
        };
        if let Some(f) = own_func_inner.borrow_mut().take() {
            detach(&target_inner, &f);
        }
        callback();
    }) as Box<dyn FnMut(web::Event)>);
    let func: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    *own_func.borrow_mut() = Some(func.clone());
    for ev in GESTURE_EVENTS {
        if let Err(e) = target.add_event_listener_with_callback(ev, &func) {
            log::warn!("[gesture] add {} listener failed: {:?}", ev, e);
        }
    }
    log::info!("[gesture] waiting for a tap to resume audio");
    GestureSubscription {
        target: target.clone(),
        func,
        _closure: closure,
    }
}
