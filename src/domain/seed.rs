//! Built-in directory content.
//!
//! The catalog ships with the municipal listings the directory site
//! launched with. Loading from an external source can replace this
//! wholesale; nothing else in the crate assumes these exact entries.

use super::models::{Article, Business, Catalog, Coordinates};

/// The built-in business catalog, in publication order.
pub fn builtin_catalog() -> Catalog {
    Catalog::new(vec![
        Business {
            id: 1,
            name: "Hotel Boutique Raíces".to_string(),
            category: "Alojamiento".to_string(),
            phone: "(+56) 75 2 543440".to_string(),
            email: "recepcion@hotelraices.cl".to_string(),
            address: "Carmen 727, Curicó".to_string(),
            image: "imagenes/boutique-hotel-chile.jpg".to_string(),
            featured: false,
            coords: Coordinates::new(-34.9825, -71.2394),
        },
        Business {
            id: 2,
            name: "Maule Norte GLP".to_string(),
            category: "Venta de productos".to_string(),
            phone: "+56978748999".to_string(),
            email: "luismoralescastro@hotmail.com".to_string(),
            address: "Callejón Hijuelas S/N Santa Helena".to_string(),
            image: "imagenes/gas-distribution-company.jpg".to_string(),
            featured: false,
            coords: Coordinates::new(-35.022, -71.200),
        },
        Business {
            id: 3,
            name: "Miqueles Boutique".to_string(),
            category: "Venta de productos".to_string(),
            phone: "+56949685316".to_string(),
            email: "amandamiqueles@gmail.com".to_string(),
            address: "O'Higgins 487, Curicó".to_string(),
            image: "imagenes/fashion-boutique.png".to_string(),
            featured: true,
            coords: Coordinates::new(-35.035, -71.230),
        },
        Business {
            id: 4,
            name: "Play Solution".to_string(),
            category: "Servicios".to_string(),
            phone: "+56912345678".to_string(),
            email: "contacto@playsolution.cl".to_string(),
            address: "Av. Manso de Velasco 1234, Curicó".to_string(),
            image: "imagenes/team-building-activities.png".to_string(),
            featured: true,
            coords: Coordinates::new(-34.970, -71.245),
        },
        Business {
            id: 5,
            name: "Gestor Consultoría".to_string(),
            category: "Servicios".to_string(),
            phone: "+56987654321".to_string(),
            email: "info@gestorconsultoria.cl".to_string(),
            address: "Merced 567, Curicó".to_string(),
            image: "imagenes/business-consulting-office.png".to_string(),
            featured: true,
            coords: Coordinates::new(-34.990, -71.220),
        },
        Business {
            id: 6,
            name: "Renace Mujer".to_string(),
            category: "Servicios".to_string(),
            phone: "+56923456789".to_string(),
            email: "contacto@renacemujer.cl".to_string(),
            address: "Carmen 890, Curicó".to_string(),
            image: "imagenes/women-empowerment-center.jpg".to_string(),
            featured: true,
            coords: Coordinates::new(-35.000, -71.210),
        },
    ])
}

/// The built-in article list for the news view.
pub fn builtin_articles() -> Vec<Article> {
    vec![
        Article {
            id: 1,
            title: "Parque Cuenca Andina: el corazón nativo del Maule abre sus puertas al mundo"
                .to_string(),
            excerpt: "En el corazón de la cordillera maulina, donde el viento conversa con los bosques nativos..."
                .to_string(),
            full_content: "En el corazón de la cordillera maulina, donde el viento conversa con los bosques nativos, el Parque Cuenca Andina se consolida como un espacio de conservación y turismo sustentable."
                .to_string(),
            image: "imagenes/mountain-landscape-andes-chile.jpg".to_string(),
            author: "Descubre Curicó".to_string(),
            date: "Oct 4, 2025".to_string(),
            category: "Cultura y Tradiciones".to_string(),
            comments: Vec::new(),
        },
        Article {
            id: 2,
            title: "Un nuevo hito en Descubre Curicó en sus 10 años".to_string(),
            excerpt: "En la ciudad de Curicó, el día 22 de agosto de 2025, se llevó a cabo una reunión de networking..."
                .to_string(),
            full_content: "El día 22 de agosto de 2025 se celebró una reunión de networking con emprendedores locales en honor a los 10 años de Descubre Curicó."
                .to_string(),
            image: "imagenes/business-meeting-group-photo.jpg".to_string(),
            author: "Descubre Curicó".to_string(),
            date: "Ago 24, 2025".to_string(),
            category: "Noticias".to_string(),
            comments: Vec::new(),
        },
        Article {
            id: 3,
            title: "La ruta del vino: tradición, sabores y paisaje maulino".to_string(),
            excerpt: "Entre viñedos centenarios y aromas frutales, la ruta del vino en Curicó se renueva..."
                .to_string(),
            full_content: "Entre viñedos centenarios y aromas frutales, la ruta del vino en Curicó se renueva con propuestas enoturísticas que integran gastronomía local y experiencias sensoriales."
                .to_string(),
            image: "imagenes/wine-route-curico.jpg".to_string(),
            author: "Descubre Curicó".to_string(),
            date: "Sep 12, 2025".to_string(),
            category: "Turismo".to_string(),
            comments: Vec::new(),
        },
        Article {
            id: 4,
            title: "Curicó Verde: iniciativas que transforman la ciudad".to_string(),
            excerpt: "Nuevos proyectos urbanos impulsan una Curicó más sustentable y conectada con la naturaleza..."
                .to_string(),
            full_content: "Curicó Verde promueve huertos comunitarios y espacios urbanos verdes para una ciudad más sustentable."
                .to_string(),
            image: "imagenes/green-city-curico.jpg".to_string(),
            author: "Equipo Editorial".to_string(),
            date: "Oct 10, 2025".to_string(),
            category: "Sustentabilidad".to_string(),
            comments: Vec::new(),
        },
    ]
}
