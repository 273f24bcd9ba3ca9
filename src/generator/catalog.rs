//! Fixed vocabularies for synthetic records

use crate::domain::CategoryId;

pub const FIRST_NAMES: [&str; 30] = [
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Susan", "Richard", "Jessica", "Joseph", "Sarah", "Thomas", "Karen",
    "Charles", "Nancy", "Emma", "Liam", "Olivia", "Noah", "Ava", "Sophia", "Jackson", "Isabella",
    "Lucas", "Mia",
];

pub const LAST_NAMES: [&str; 30] = [
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia",
    "Martinez", "Robinson", "Clark", "Rodriguez", "Lewis", "Lee", "Walker", "Hall", "Allen",
    "Young", "King", "Wright",
];

pub const OCCUPATIONS: [&str; 10] = [
    "Doctor",
    "Teacher",
    "Engineer",
    "Salesperson",
    "Developer",
    "Designer",
    "Accountant",
    "Nurse",
    "Manager",
    "Student",
];

/// (city, state)
pub const CITIES: [(&str, &str); 20] = [
    ("New York", "New York"),
    ("Los Angeles", "California"),
    ("Chicago", "Illinois"),
    ("Houston", "Texas"),
    ("Phoenix", "Arizona"),
    ("Philadelphia", "Pennsylvania"),
    ("San Antonio", "Texas"),
    ("San Diego", "California"),
    ("Dallas", "Texas"),
    ("San Jose", "California"),
    ("Austin", "Texas"),
    ("Jacksonville", "Florida"),
    ("Fort Worth", "Texas"),
    ("Columbus", "Ohio"),
    ("Charlotte", "North Carolina"),
    ("San Francisco", "California"),
    ("Indianapolis", "Indiana"),
    ("Seattle", "Washington"),
    ("Denver", "Colorado"),
    ("Boston", "Massachusetts"),
];

pub struct CategorySpec {
    pub id: CategoryId,
    pub name: &'static str,
    pub products: [&'static str; 10],
    pub brands: [&'static str; 10],
}

pub const CATEGORIES: [CategorySpec; 10] = [
    CategorySpec {
        id: 1,
        name: "Electronics",
        products: [
            "Smartphone Pro", "Wireless Earbuds", "Ultra HD Smart TV", "Laptop Elite",
            "Digital Camera", "Bluetooth Speaker", "Fitness Tracker", "Gaming Console",
            "Wireless Charger", "Smart Watch",
        ],
        brands: [
            "Apple", "Samsung", "Sony", "LG", "Bose", "JBL", "Fitbit", "Microsoft", "Google",
            "Lenovo",
        ],
    },
    CategorySpec {
        id: 2,
        name: "Clothing",
        products: [
            "Classic T-Shirt", "Slim Fit Jeans", "Casual Hoodie", "Athletic Shorts",
            "Formal Dress Shirt", "Winter Jacket", "Running Shoes", "Designer Sunglasses",
            "Leather Belt", "Cotton Socks",
        ],
        brands: [
            "Nike", "Adidas", "Levi's", "H&M", "Zara", "Gap", "Under Armour", "Ralph Lauren",
            "Gucci", "Calvin Klein",
        ],
    },
    CategorySpec {
        id: 3,
        name: "Home & Kitchen",
        products: [
            "Coffee Maker", "Air Fryer", "Non-Stick Pan Set", "Smart Refrigerator", "Blender Pro",
            "Robot Vacuum", "Microwave Oven", "Toaster", "Knife Set", "Cookware Collection",
        ],
        brands: [
            "KitchenAid", "Cuisinart", "Breville", "Ninja", "Instant Pot", "Calphalon", "iRobot",
            "Keurig", "Dyson", "Vitamix",
        ],
    },
    CategorySpec {
        id: 4,
        name: "Beauty & Personal Care",
        products: [
            "Facial Cleanser", "Moisturizing Cream", "Hair Dryer", "Electric Shaver",
            "Perfume Collection", "Makeup Kit", "Whitening Toothpaste", "Men's Grooming Kit",
            "Nail Polish Set", "Hair Styling Tools",
        ],
        brands: [
            "L'Oreal", "Neutrogena", "Olay", "Dove", "Maybelline", "Revlon", "Gillette",
            "Clinique", "Pantene", "Estée Lauder",
        ],
    },
    CategorySpec {
        id: 5,
        name: "Books & Media",
        products: [
            "Bestselling Novel", "Children's Picture Book", "Cookbook Collection",
            "History Encyclopedia", "Self-Help Guide", "Business Strategy Book", "Sci-Fi Trilogy",
            "Travel Guide", "Educational Textbook", "Audiobook Subscription",
        ],
        brands: [
            "Penguin Random House", "HarperCollins", "Simon & Schuster", "Hachette", "Macmillan",
            "Scholastic", "Wiley", "Pearson", "Audible", "Kindle",
        ],
    },
    CategorySpec {
        id: 6,
        name: "Sports & Outdoors",
        products: [
            "Tennis Racket", "Yoga Mat", "Camping Tent", "Hiking Backpack", "Basketball",
            "Fishing Rod", "Mountain Bike", "Golf Club Set", "Fitness Dumbbell",
            "Swimming Goggles",
        ],
        brands: [
            "Wilson", "Coleman", "The North Face", "Columbia", "Spalding", "Callaway", "Shimano",
            "Schwinn", "Bowflex", "Speedo",
        ],
    },
    CategorySpec {
        id: 7,
        name: "Toys & Games",
        products: [
            "Building Blocks", "Remote Control Car", "Board Game Collection", "Action Figure",
            "Plush Animal", "Educational Puzzle", "Video Game", "Dollhouse", "Card Game Set",
            "Science Kit",
        ],
        brands: [
            "LEGO", "Mattel", "Hasbro", "Fisher-Price", "Nintendo", "Electronic Arts",
            "PlayStation", "Melissa & Doug", "Ravensburger", "Nerf",
        ],
    },
    CategorySpec {
        id: 8,
        name: "Groceries",
        products: [
            "Organic Coffee", "Gourmet Chocolate", "Artisan Pasta", "Specialty Tea",
            "Premium Olive Oil", "Aged Cheese", "Gluten-Free Bread", "Dried Fruit Mix",
            "Granola Bars", "Spice Collection",
        ],
        brands: [
            "Whole Foods", "Ghirardelli", "Barilla", "Twinings", "Bertolli", "Kraft", "Udi's",
            "Sun-Maid", "Nature Valley", "McCormick",
        ],
    },
    CategorySpec {
        id: 9,
        name: "Furniture",
        products: [
            "Ergonomic Office Chair", "Sofa Set", "Queen Size Bed", "Dining Table", "Bookshelf",
            "Coffee Table", "TV Stand", "Nightstand", "Outdoor Patio Set", "Storage Cabinet",
        ],
        brands: [
            "IKEA", "Ashley Furniture", "La-Z-Boy", "Pottery Barn", "Crate & Barrel", "West Elm",
            "Wayfair", "Serta", "Herman Miller", "Restoration Hardware",
        ],
    },
    CategorySpec {
        id: 10,
        name: "Automotive",
        products: [
            "Car GPS Navigator", "Dash Camera", "Floor Mats", "Car Seat Covers", "Air Freshener",
            "Portable Tire Inflator", "Bluetooth Car Adapter", "Car Cleaning Kit", "Phone Mount",
            "Jump Starter",
        ],
        brands: [
            "Garmin", "Thinkware", "WeatherTech", "Covercraft", "Febreze", "Slime", "Anker",
            "Meguiar's", "iOttie", "NOCO",
        ],
    },
];

/// Distinct (category, product name, brand) combinations available
pub const MAX_DISTINCT_PRODUCTS: usize = CATEGORIES.len() * 10 * 10;
