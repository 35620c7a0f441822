//! The QPSC architecture diagrams.
//!
//! Every builder is pure: no inputs, no I/O, and the same statements on every call.

use dotgraph::Graph;

use crate::palette::{
    ALERT_RED, CONFIG, DATA, FLOW_DARK, HARDWARE, MICROMANAGER, PYCROMANAGER, PYTHON_DARK,
    PYTHON_LIGHT, QPSC_BLUE, QUPATH_BLUE, QUPATH_LIGHT, RETURN_GRAY, USER,
};

/// A built diagram together with the base name its output files are written under.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub name: &'static str,
    pub graph: Graph,
}

/// Filled node with white text.
fn white_on(fill: &str) -> [(&str, &str); 2] {
    [("fillcolor", fill), ("fontcolor", "white")]
}

/// Attributes shared by the top-level layer clusters of the complete diagram.
fn layer<'a>(label: &'a str, fill: &'a str, border: &'a str) -> [(&'a str, &'a str); 6] {
    [
        ("label", label),
        ("style", "filled"),
        ("fillcolor", fill),
        ("color", border),
        ("fontsize", "12"),
        ("fontname", "Helvetica Bold"),
    ]
}

/// Every component and package of the system and how they talk to each other.
pub fn complete_architecture() -> Graph {
    let mut dot = Graph::digraph("QPSC_Complete_Architecture")
        .with_comment("QPSC Complete System Architecture");
    dot.attr(&[
        ("rankdir", "TB"),
        ("compound", "true"),
        ("splines", "ortho"),
        ("nodesep", "0.5"),
        ("ranksep", "0.6"),
    ]);
    dot.node_attr(&[
        ("shape", "box"),
        ("style", "rounded,filled"),
        ("fontname", "Helvetica"),
        ("fontsize", "11"),
    ]);
    dot.edge_attr(&[("fontname", "Helvetica"), ("fontsize", "9")]);

    dot.subgraph("cluster_user", |user| {
        user.attr(&layer("User", "#EBF5FB", "#3498DB"));
        user.node(
            "researcher",
            "Researcher / Pathologist\n(Define ROIs, Configure Acquisition)",
            &white_on(USER),
        );
    });

    dot.subgraph("cluster_qupath", |qp| {
        qp.attr(&layer("QuPath Ecosystem (Java)", "#E8F4FD", QUPATH_BLUE));

        qp.subgraph("cluster_qp_core", |core| {
            core.attr(&[
                ("label", "QuPath Core"),
                ("style", "dashed"),
                ("color", "#4A90D9"),
            ]);
            core.node("qp_app", "QuPath Application", &white_on(QUPATH_BLUE));
            core.node("qp_viewer", "Image Viewer\n& Annotations", &white_on(QUPATH_BLUE));
            core.node("qp_project", "Project System", &white_on(QUPATH_BLUE));
        });

        qp.subgraph("cluster_qpsc", |qpsc| {
            qpsc.attr(&[
                ("label", "qupath-extension-qpsc"),
                ("style", "filled"),
                ("fillcolor", "#D4E8FC"),
                ("color", "#4A90D9"),
            ]);
            qpsc.node(
                "qpsc_controller",
                "Workflow Controllers\n(BoundingBox, ExistingImage,\nAlignment)",
                &white_on(QPSC_BLUE),
            );
            qpsc.node(
                "qpsc_modality",
                "Modality System\n(PPM, Brightfield, etc.)",
                &white_on(QPSC_BLUE),
            );
            qpsc.node(
                "qpsc_socket",
                "Socket Client\n(TCP Communication)",
                &white_on(QPSC_BLUE),
            );
            qpsc.node(
                "qpsc_utils",
                "Utilities\n(Config, Tiling,\nCoordinates)",
                &white_on(QPSC_BLUE),
            );
        });

        qp.node(
            "t2p",
            "qupath-extension-\ntiles-to-pyramid\n(Stitching)",
            &white_on(QUPATH_LIGHT),
        );
    });

    dot.subgraph("cluster_python", |py| {
        py.attr(&layer(
            "Python Microscope Control (pip packages)",
            "#E8F0F8",
            PYTHON_DARK,
        ));

        let package = |label| {
            [
                ("label", label),
                ("style", "filled"),
                ("fillcolor", "#D4E4F4"),
                ("color", "#306998"),
            ]
        };

        py.subgraph("cluster_server", |srv| {
            srv.attr(&package("microscope-command-server"));
            srv.node("srv_socket", "Socket Server\n(TCP/IP)", &white_on(PYTHON_DARK));
            srv.node(
                "srv_workflow",
                "Acquisition Workflows\n(Orchestration)",
                &white_on(PYTHON_DARK),
            );
            srv.node("srv_pipeline", "Processing Pipeline", &white_on(PYTHON_DARK));
        });

        py.subgraph("cluster_control", |ctrl| {
            ctrl.attr(&package("microscope-control"));
            ctrl.node(
                "ctrl_hw",
                "Hardware Abstraction\n(Stage, Camera)",
                &white_on(PYTHON_LIGHT),
            );
            ctrl.node(
                "ctrl_af",
                "Autofocus System\n(Algorithms, Metrics)",
                &white_on(PYTHON_LIGHT),
            );
            ctrl.node(
                "ctrl_tissue",
                "Tissue Detection\n(Empty Region Skip)",
                &white_on(PYTHON_LIGHT),
            );
            ctrl.node(
                "ctrl_config",
                "Config Manager\n(YAML Loading)",
                &white_on(PYTHON_LIGHT),
            );
        });

        py.subgraph("cluster_ppm", |ppm| {
            ppm.attr(&package("ppm-library"));
            ppm.node(
                "ppm_cal",
                "PPM Calibration\n(Polarizer, Hue-to-Angle)",
                &white_on(PYTHON_LIGHT),
            );
            ppm.node("ppm_debayer", "Debayering\n(CPU/GPU)", &white_on(PYTHON_LIGHT));
            ppm.node(
                "ppm_imaging",
                "Image Processing\n(Background, Correction)",
                &white_on(PYTHON_LIGHT),
            );
            ppm.node(
                "ppm_analysis",
                "Analysis Workflows\n(Fiber Angles)",
                &white_on(PYTHON_LIGHT),
            );
        });

        py.subgraph("cluster_configs", |cfg| {
            cfg.attr(&[
                ("label", "microscope-configurations"),
                ("style", "filled"),
                ("fillcolor", "#E8F8E8"),
                ("color", "#27AE60"),
            ]);
            cfg.node(
                "cfg_templates",
                "YAML Templates\n(config, autofocus,\nimageprocessing)",
                &white_on(CONFIG),
            );
            cfg.node(
                "cfg_resources",
                "Hardware Resources\n(LOCI Lookup Tables)",
                &white_on(CONFIG),
            );
        });
    });

    dot.subgraph("cluster_mm", |mm| {
        mm.attr(&layer("Micro-Manager Stack", "#FDF2E8", PYCROMANAGER));
        mm.node(
            "pycromanager",
            "Pycro-Manager\n(Python-Java Bridge)",
            &white_on(PYCROMANAGER),
        );
        mm.node(
            "micromanager",
            "Micro-Manager\n(Device Adapters)",
            &white_on(MICROMANAGER),
        );
        mm.node("mmcore", "MMCore API", &white_on(MICROMANAGER));
    });

    dot.subgraph("cluster_hw", |hw| {
        hw.attr(&layer("Microscope Hardware", "#FDEDEC", HARDWARE));
        hw.node("hw_stage", "XYZ Stage", &white_on(HARDWARE));
        hw.node("hw_camera", "Camera", &white_on(HARDWARE));
        hw.node(
            "hw_optics",
            "Optics\n(Polarizers, Objectives,\nIllumination)",
            &white_on(HARDWARE),
        );
    });

    dot.subgraph("cluster_data", |data| {
        data.attr(&layer("Data Output", "#F4ECF7", DATA));
        data.node("data_tiles", "Raw Tiles\n(OME-TIFF)", &white_on(DATA));
        data.node(
            "data_pyramid",
            "Pyramidal Images\n(OME-ZARR / OME-TIFF)",
            &white_on(DATA),
        );
    });

    // User flow and QuPath internals.
    dot.edge("researcher", "qp_viewer", &[("label", "Draw ROIs")]);
    dot.edge("qp_app", "qp_viewer", &[]);
    dot.edge("qp_app", "qp_project", &[]);
    dot.edge("qp_viewer", "qpsc_controller", &[("label", "ROI Bounds")]);

    dot.edge("qpsc_controller", "qpsc_modality", &[]);
    dot.edge("qpsc_controller", "qpsc_socket", &[]);
    dot.edge("qpsc_controller", "qpsc_utils", &[]);
    dot.edge("qpsc_modality", "qpsc_socket", &[]);

    // The one link between the Java and Python halves.
    dot.edge(
        "qpsc_socket",
        "srv_socket",
        &[
            ("label", "TCP Socket\nCommands"),
            ("color", ALERT_RED),
            ("penwidth", "2.5"),
            ("style", "bold"),
        ],
    );

    dot.edge("srv_socket", "srv_workflow", &[]);
    dot.edge("srv_workflow", "srv_pipeline", &[]);
    dot.edge("srv_workflow", "ctrl_hw", &[]);
    dot.edge("srv_workflow", "ctrl_af", &[]);
    dot.edge("srv_pipeline", "ppm_debayer", &[]);
    dot.edge("srv_pipeline", "ppm_imaging", &[]);

    dot.edge("ctrl_af", "ctrl_tissue", &[]);
    dot.edge("ctrl_config", "cfg_templates", &[("style", "dashed")]);
    dot.edge(
        "cfg_templates",
        "cfg_resources",
        &[("style", "dashed"), ("label", "references")],
    );

    dot.edge("ppm_cal", "ppm_analysis", &[]);

    // Hardware control chain.
    dot.edge("ctrl_hw", "pycromanager", &[("label", "Python API")]);
    dot.edge("pycromanager", "micromanager", &[("label", "Java Bridge")]);
    dot.edge("micromanager", "mmcore", &[]);
    dot.edge("mmcore", "hw_stage", &[]);
    dot.edge("mmcore", "hw_camera", &[]);
    dot.edge("mmcore", "hw_optics", &[]);

    // Data flow.
    dot.edge(
        "hw_camera",
        "data_tiles",
        &[("label", "Capture"), ("style", "dashed")],
    );
    dot.edge("data_tiles", "t2p", &[("label", "Stitch")]);
    dot.edge("t2p", "data_pyramid", &[]);
    dot.edge("data_pyramid", "qp_project", &[("label", "Import")]);

    dot.edge(
        "qp_project",
        "qp_viewer",
        &[
            ("style", "dashed"),
            ("label", "Iterative\nAcquisition"),
            ("color", CONFIG),
        ],
    );

    dot
}

/// Presentation view for general audiences: the numbered acquisition and processing loop.
pub fn simplified_slide() -> Graph {
    let mut dot = Graph::digraph("QPSC_Simplified").with_comment("QPSC - Software-Driven Microscopy");
    dot.attr(&[
        ("rankdir", "LR"),
        ("splines", "polyline"),
        ("nodesep", "0.8"),
        ("ranksep", "1.2"),
    ]);
    dot.node_attr(&[
        ("shape", "box"),
        ("style", "rounded,filled"),
        ("fontname", "Helvetica"),
        ("fontsize", "14"),
        ("width", "2"),
        ("height", "0.8"),
    ]);
    dot.edge_attr(&[("fontname", "Helvetica"), ("fontsize", "11"), ("penwidth", "2")]);

    dot.node(
        "user",
        "Researcher\nDefines Regions",
        &[("fillcolor", USER), ("fontcolor", "white"), ("shape", "ellipse")],
    );
    dot.node(
        "qupath",
        "QuPath\n+ QPSC Extension\n(Annotation & Control)",
        &white_on(QUPATH_BLUE),
    );
    dot.node(
        "python",
        "Python Server\n(Acquisition &\nProcessing)",
        &white_on(PYTHON_DARK),
    );
    dot.node(
        "micromanager",
        "Micro-Manager\n(Hardware Control)",
        &white_on(PYCROMANAGER),
    );
    dot.node(
        "microscope",
        "Automated\nMicroscope",
        &[("fillcolor", HARDWARE), ("fontcolor", "white"), ("shape", "box3d")],
    );
    dot.node(
        "output",
        "High-Resolution\nImages",
        &[("fillcolor", DATA), ("fontcolor", "white"), ("shape", "folder")],
    );

    let forward = |label| [("label", label), ("color", FLOW_DARK)];
    dot.edge("user", "qupath", &forward("1. Draw ROIs"));
    dot.edge("qupath", "python", &forward("2. Send Commands"));
    dot.edge("python", "micromanager", &forward("3. Control"));
    dot.edge("micromanager", "microscope", &forward("4. Move & Capture"));

    // Return flow; `constraint=false` keeps these from pulling on the ranks.
    dot.edge(
        "microscope",
        "python",
        &[
            ("label", "5. Images"),
            ("style", "dashed"),
            ("color", RETURN_GRAY),
            ("constraint", "false"),
        ],
    );
    dot.edge(
        "python",
        "output",
        &[
            ("label", "6. Process & Stitch"),
            ("style", "dashed"),
            ("color", RETURN_GRAY),
        ],
    );
    dot.edge(
        "output",
        "qupath",
        &[
            ("label", "7. Import Results"),
            ("style", "dashed"),
            ("color", RETURN_GRAY),
            ("constraint", "false"),
        ],
    );

    dot.edge(
        "qupath",
        "user",
        &[
            ("label", "8. Refine & Repeat"),
            ("style", "dotted"),
            ("color", CONFIG),
            ("constraint", "false"),
        ],
    );

    dot
}

/// Single-slide overview: annotate, acquire, analyze.
pub fn compact_slide() -> Graph {
    let mut dot = Graph::digraph("QPSC_Slide").with_comment("QPSC Overview");
    dot.attr(&[
        ("rankdir", "LR"),
        ("splines", "spline"),
        ("nodesep", "1"),
        ("ranksep", "1.5"),
        ("bgcolor", "transparent"),
    ]);
    dot.node_attr(&[
        ("shape", "box"),
        ("style", "rounded,filled,bold"),
        ("fontname", "Helvetica Bold"),
        ("fontsize", "16"),
        ("width", "2.2"),
        ("height", "1"),
    ]);
    dot.edge_attr(&[("fontname", "Helvetica"), ("fontsize", "12"), ("penwidth", "3")]);

    dot.node("annotate", "QuPath\nAnnotate\nRegions", &white_on(QUPATH_BLUE));
    dot.node(
        "acquire",
        "Automated\nAcquisition\n& Processing",
        &white_on(PYTHON_DARK),
    );
    dot.node("analyze", "High-Res\nImages for\nAnalysis", &white_on(DATA));

    dot.edge(
        "annotate",
        "acquire",
        &[
            ("label", "Software\nControls\nMicroscope"),
            ("color", ALERT_RED),
            ("fontcolor", ALERT_RED),
        ],
    );
    dot.edge(
        "acquire",
        "analyze",
        &[
            ("label", "Stitched\nPyramidal\nImages"),
            ("color", CONFIG),
            ("fontcolor", CONFIG),
        ],
    );
    dot.edge(
        "analyze",
        "annotate",
        &[
            ("label", "Iterative\nRefinement"),
            ("style", "dashed"),
            ("color", RETURN_GRAY),
            ("constraint", "false"),
        ],
    );

    dot
}

/// All diagrams in output order.
pub fn diagrams() -> Vec<Diagram> {
    vec![
        Diagram {
            name: "qpsc_architecture_complete",
            graph: complete_architecture(),
        },
        Diagram {
            name: "qpsc_architecture_simplified",
            graph: simplified_slide(),
        },
        Diagram {
            name: "qpsc_architecture_slide",
            graph: compact_slide(),
        },
    ]
}
